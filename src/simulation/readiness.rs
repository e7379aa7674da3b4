//! Weapon readiness progression
//!
//! Entering a transient state schedules exactly one transition event for
//! its end; the handler re-validates before applying, so stale events
//! from an earlier chain fall through harmlessly. Movement never touches
//! any of this.

use tracing::debug;

use crate::combat::combatant::{CombatMode, Combatant};
use crate::combat::constants::SYNTHETIC_READY_TICKS;
use crate::combat::states::WeaponStateName;
use crate::core::error::Result;
use crate::core::types::{CombatantId, Tick};
use crate::simulation::events::EventKind;
use crate::simulation::world::World;

fn raw_state_ticks(combatant: &Combatant, state: WeaponStateName) -> Option<Tick> {
    match combatant.combat_mode {
        CombatMode::Ranged => combatant
            .ranged_weapon
            .as_ref()
            .and_then(|w| w.state_ticks(state)),
        CombatMode::Melee => combatant
            .melee_weapon
            .as_ref()
            .and_then(|w| w.state_ticks(state)),
    }
}

/// State duration with preparation-speed scaling applied
///
/// `None` when the weapon data omits the state; callers substitute the
/// synthetic ready fallback.
pub(crate) fn scaled_state_ticks(combatant: &Combatant, state: WeaponStateName) -> Option<Tick> {
    let base = raw_state_ticks(combatant, state)?;
    let ticks = if state.is_preparation() {
        (base as f64 * combatant.preparation_multiplier()).round() as Tick
    } else {
        base
    };
    Some(ticks.max(1))
}

fn hold_state(mode: CombatMode) -> WeaponStateName {
    match mode {
        CombatMode::Ranged => WeaponStateName::Ready,
        CombatMode::Melee => WeaponStateName::MeleeReady,
    }
}

impl World {
    /// Resume readiness progression toward the hold state
    ///
    /// No-op when already progressing or at or past the hold state; a
    /// ready command never restarts the chain.
    pub(crate) fn begin_readying(&mut self, id: CombatantId) -> Result<()> {
        let now = self.current_tick();
        let combatant = self.combatant_mut(id)?;
        if combatant.incapacitated {
            return Ok(());
        }
        let entering = match combatant.weapon_state {
            WeaponStateName::Holstered => WeaponStateName::Unsling,
            WeaponStateName::Sheathed => WeaponStateName::Unsheathing,
            _ => return Ok(()),
        };
        combatant.weapon_state = entering;
        let hold = hold_state(combatant.combat_mode);
        // Missing weapon data degrades to a synthetic ready-up, never a
        // permanently unready combatant
        let ticks = scaled_state_ticks(combatant, entering).unwrap_or(SYNTHETIC_READY_TICKS);
        let sequence = combatant.attack_sequence;
        debug!(?id, state = ?entering, due = now + ticks, "readying weapon");
        self.scheduler
            .schedule(now + ticks, id, EventKind::StateTransition { to: hold, sequence });
        Ok(())
    }

    pub(crate) fn handle_state_transition(
        &mut self,
        owner: CombatantId,
        to: WeaponStateName,
        sequence: u64,
    ) -> Result<()> {
        let now = self.current_tick();
        let combatant = self.combatant_mut(owner)?;
        if combatant.incapacitated {
            return Ok(());
        }
        if combatant.weapon_state.pending_transition() != Some(to)
            || combatant.attack_sequence != sequence
        {
            // Stale event from a superseded chain
            return Ok(());
        }
        combatant.weapon_state = to;
        debug!(?owner, state = ?to, tick = now, "weapon state transition");
        let mut follow_up: Option<(Tick, WeaponStateName)> = None;
        match to {
            WeaponStateName::Aiming => {
                combatant.aiming_since = Some(now);
                if !combatant.is_automatic_firing {
                    // attack sequence complete; targeting decides what's next
                    combatant.is_attacking = false;
                }
            }
            WeaponStateName::Recovering => {
                let ticks = scaled_state_ticks(combatant, WeaponStateName::Recovering)
                    .unwrap_or(SYNTHETIC_READY_TICKS);
                follow_up = Some((ticks, WeaponStateName::Aiming));
            }
            WeaponStateName::MeleeRecovery => {
                let ticks = scaled_state_ticks(combatant, WeaponStateName::MeleeRecovery)
                    .unwrap_or(SYNTHETIC_READY_TICKS);
                follow_up = Some((ticks, WeaponStateName::MeleeReady));
            }
            WeaponStateName::MeleeReady => {
                combatant.is_attacking = false;
            }
            _ => {}
        }
        if let Some((ticks, next)) = follow_up {
            self.scheduler.schedule(
                now + ticks,
                owner,
                EventKind::StateTransition { to: next, sequence },
            );
        }
        Ok(())
    }
}
