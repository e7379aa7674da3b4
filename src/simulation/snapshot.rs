//! Pure-data combatant snapshots
//!
//! The save/load subsystem lives outside the core: it receives a
//! serializable snapshot here and performs its own I/O. Combatant state
//! is already pure data (targets are ids, never references), so a
//! snapshot is a faithful image of everything persistent.

use serde::{Deserialize, Serialize};

use crate::combat::combatant::Combatant;
use crate::combat::constants::{BRAVERY_RECOVERY_TICKS, SYNTHETIC_READY_TICKS};
use crate::core::error::Result;
use crate::core::types::CombatantId;
use crate::simulation::events::EventKind;
use crate::simulation::readiness::scaled_state_ticks;
use crate::simulation::world::World;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub combatant: Combatant,
}

impl World {
    pub fn snapshot(&self, id: CombatantId) -> Result<CombatantSnapshot> {
        Ok(CombatantSnapshot {
            combatant: self.combatant(id)?.clone(),
        })
    }

    /// Replace the matching combatant's state wholesale
    ///
    /// The event queue is not part of a snapshot, so restore rebuilds
    /// the scheduled work the restored state implies; without that, a
    /// combatant restored mid-transition would never leave it.
    pub fn restore(&mut self, snapshot: CombatantSnapshot) -> Result<()> {
        let id = snapshot.combatant.id;
        let slot = self.combatant_mut(id)?;
        *slot = snapshot.combatant;
        self.reschedule_restored(id)
    }

    /// Queue the events a freshly restored combatant is waiting on: the
    /// pending weapon-state transition (restarted at full duration),
    /// reload completion, hesitation end, and bravery recoveries.
    /// In-flight attack flags are cleared; auto-targeting or a fresh
    /// command re-engages from the restored state.
    fn reschedule_restored(&mut self, id: CombatantId) -> Result<()> {
        let now = self.current_tick();
        let (pending, reload_ticks, hesitating_until, bravery_failures, sequence) = {
            let c = self.combatant_mut(id)?;
            c.is_attacking = false;
            c.is_automatic_firing = false;
            c.burst_shots_fired = 0;
            let pending = c.weapon_state.pending_transition().map(|next| {
                (
                    scaled_state_ticks(c, c.weapon_state).unwrap_or(SYNTHETIC_READY_TICKS),
                    next,
                )
            });
            let reload_ticks = match (c.is_reloading, c.ranged_weapon.as_ref()) {
                (true, Some(weapon)) => Some(weapon.reload_ticks.max(1)),
                (true, None) => {
                    c.is_reloading = false;
                    None
                }
                _ => None,
            };
            (
                pending,
                reload_ticks,
                c.hesitating_until,
                c.bravery_failures,
                c.attack_sequence,
            )
        };
        if let Some((ticks, next)) = pending {
            self.scheduler.schedule(
                now + ticks,
                id,
                EventKind::StateTransition { to: next, sequence },
            );
        }
        if let Some(ticks) = reload_ticks {
            self.scheduler
                .schedule(now + ticks, id, EventKind::ReloadComplete);
        }
        if let Some(until) = hesitating_until {
            if until > now {
                self.scheduler.schedule(until, id, EventKind::HesitationEnd);
            }
        }
        for n in 1..=bravery_failures as u64 {
            self.scheduler
                .schedule(now + BRAVERY_RECOVERY_TICKS * n, id, EventKind::BraveryRecovery);
        }
        Ok(())
    }

    pub fn snapshot_json(&self, id: CombatantId) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot(id)?)?)
    }

    pub fn restore_json(&mut self, text: &str) -> Result<()> {
        self.restore(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::body_part::BodyPart;
    use crate::combat::states::WeaponStateName;
    use crate::combat::weapons::RangedWeapon;
    use crate::combat::wounds::{Wound, WoundSeverity};
    use crate::core::types::{FactionId, Vec2};

    #[test]
    fn test_snapshot_round_trip_preserves_combat_state() {
        let mut world = World::new(3);
        let id = world.spawn(|id| {
            Combatant::new(id, "veteran", FactionId::new(0), Vec2::new(12.0, -4.0))
                .with_ranged_weapon(RangedWeapon::battle_rifle())
        });
        {
            let c = world.combatant_mut(id).unwrap();
            c.health = 41;
            c.weapon_state = WeaponStateName::Aiming;
            c.ranged_weapon.as_mut().unwrap().ammunition = 13;
            c.wounds.push(Wound {
                body_part: BodyPart::LeftLeg,
                severity: WoundSeverity::Light,
                damage: 4,
                weapon: "Submachine Gun".to_string(),
                tick: 210,
            });
            c.statistics.shots_fired = 7;
        }
        let json = world.snapshot_json(id).unwrap();

        // Wreck the live state, then restore
        {
            let c = world.combatant_mut(id).unwrap();
            c.health = 1;
            c.weapon_state = WeaponStateName::Holstered;
            c.ranged_weapon.as_mut().unwrap().ammunition = 0;
            c.wounds.clear();
        }
        world.restore_json(&json).unwrap();

        let c = world.combatant(id).unwrap();
        assert_eq!(c.health, 41);
        assert_eq!(c.weapon_state, WeaponStateName::Aiming);
        assert_eq!(c.ranged_weapon.as_ref().unwrap().ammunition, 13);
        assert_eq!(c.wounds.len(), 1);
        assert_eq!(c.wounds[0].body_part, BodyPart::LeftLeg);
        assert_eq!(c.wounds[0].damage, 4);
        assert_eq!(c.statistics.shots_fired, 7);
    }

    #[test]
    fn test_restore_mid_progression_resumes_to_ready() {
        let mut source = World::new(5);
        let id = source.spawn(|id| {
            Combatant::new(id, "vanguard", FactionId::new(0), Vec2::default())
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        source.ready_weapon(id).unwrap();
        source.run(10);
        assert_eq!(source.weapon_state(id).unwrap(), WeaponStateName::Unsling);
        let snapshot = source.snapshot(id).unwrap();

        // A fresh world holds no matching transition in its queue
        let mut world = World::new(5);
        let restored = world.spawn(|id| {
            Combatant::new(id, "vanguard", FactionId::new(0), Vec2::default())
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        assert_eq!(restored, id);
        world.restore(snapshot).unwrap();
        assert_eq!(world.weapon_state(id).unwrap(), WeaponStateName::Unsling);
        world.run(61);
        assert_eq!(world.weapon_state(id).unwrap(), WeaponStateName::Ready);
    }

    #[test]
    fn test_restore_mid_reload_refills_the_magazine() {
        let mut world = World::new(5);
        let id = world.spawn(|id| {
            Combatant::new(id, "loader", FactionId::new(0), Vec2::default())
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        {
            let c = world.combatant_mut(id).unwrap();
            c.is_reloading = true;
            c.ranged_weapon.as_mut().unwrap().ammunition = 0;
        }
        let snapshot = world.snapshot(id).unwrap();
        world.restore(snapshot).unwrap();
        world.run(181);
        assert!(!world.combatant(id).unwrap().is_reloading);
        assert_eq!(world.ammunition(id).unwrap(), 6);
    }

    #[test]
    fn test_restore_rejects_unknown_combatant() {
        let world = World::new(3);
        let mut other = World::new(3);
        let id = other.spawn(|id| {
            Combatant::new(id, "ghost", FactionId::new(0), Vec2::default())
        });
        let snapshot = other.snapshot(id).unwrap();
        let mut empty = world;
        assert!(empty.restore(snapshot).is_err());
    }
}
