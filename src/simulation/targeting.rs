//! Auto-targeting controller
//!
//! Runs once per tick for every combatant with automatic targeting
//! enabled: validate or reacquire the target, then engage — close the
//! distance, ready the weapon, or attack. A valid target alone is never
//! a reason to stay idle; engagement always resumes.

use tracing::debug;

use crate::combat::combatant::CombatMode;
use crate::core::types::CombatantId;
use crate::simulation::world::World;

impl World {
    pub(crate) fn run_auto_targeting(&mut self) {
        let now = self.current_tick();
        for idx in 0..self.combatants.len() {
            {
                let c = &self.combatants[idx];
                if !c.uses_automatic_targeting
                    || c.incapacitated
                    || c.is_attacking
                    || c.is_reloading
                    || c.is_hesitating(now)
                {
                    continue;
                }
            }
            let id = self.combatants[idx].id;
            let target = if self.target_is_valid(idx) {
                self.combatants[idx].current_target
            } else {
                self.nearest_hostile(idx)
            };
            let Some(target_id) = target else {
                let c = &mut self.combatants[idx];
                c.current_target = None;
                c.persistent_attack = false;
                continue;
            };
            {
                let c = &mut self.combatants[idx];
                c.current_target = Some(target_id);
                c.persistent_attack = true;
            }
            self.engage(id, target_id);
        }
    }

    fn target_is_valid(&self, idx: usize) -> bool {
        let c = &self.combatants[idx];
        match c.current_target {
            Some(target_id) => self
                .combatant(target_id)
                .map(|t| !t.incapacitated && c.is_hostile_to(t))
                .unwrap_or(false),
            None => false,
        }
    }

    /// Nearest standing hostile; equidistant candidates go to the lowest
    /// id so reacquisition is deterministic
    fn nearest_hostile(&self, idx: usize) -> Option<CombatantId> {
        let me = &self.combatants[idx];
        let mut best: Option<(f64, CombatantId)> = None;
        for other in &self.combatants {
            if other.id == me.id || other.incapacitated || !me.is_hostile_to(other) {
                continue;
            }
            let distance = me.position.distance(&other.position);
            let better = match best {
                None => true,
                Some((d, id)) => distance < d || (distance == d && other.id < id),
            };
            if better {
                best = Some((distance, other.id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Move toward, ready up, or attack the chosen target
    fn engage(&mut self, id: CombatantId, target_id: CombatantId) {
        let Ok(target_pos) = self.combatant(target_id).map(|t| t.position) else {
            return;
        };
        let (mode, state, position, effective_range) = {
            let Ok(c) = self.combatant(id) else { return };
            let range = match c.combat_mode {
                CombatMode::Ranged => c.ranged_weapon.as_ref().map(|w| w.max_range),
                CombatMode::Melee => c.melee_weapon.as_ref().map(|w| w.reach),
            };
            (c.combat_mode, c.weapon_state, c.position, range)
        };
        let Some(range) = effective_range else {
            // No weapon for the active mode; nothing to engage with
            return;
        };
        if position.distance(&target_pos) > range {
            // Approach refreshed every tick so pursuit tracks a moving
            // target; weapon readiness progresses independently
            if let Ok(c) = self.combatant_mut(id) {
                c.move_target = Some(target_pos);
            }
            if let Err(err) = self.begin_readying(id) {
                debug!(?id, %err, "ready-up rejected");
            }
            return;
        }
        if let Ok(c) = self.combatant_mut(id) {
            c.move_target = None;
        }
        let capable = match mode {
            CombatMode::Ranged => state.is_ranged_attack_capable(),
            CombatMode::Melee => state.is_melee_attack_capable(),
        };
        if capable {
            let result = match mode {
                CombatMode::Ranged => self.start_ranged_attack(id, target_id),
                CombatMode::Melee => self.start_melee_attack(id, target_id),
            };
            if let Err(err) = result {
                debug!(?id, ?target_id, %err, "engagement rejected");
            }
        } else if let Err(err) = self.begin_readying(id) {
            debug!(?id, %err, "ready-up rejected");
        }
    }
}
