//! Validated command intake
//!
//! The surface external layers drive the core through. Every command
//! validates before mutating; rejected commands leave state untouched.

use crate::combat::aiming::AimingSpeed;
use crate::combat::combatant::CombatMode;
use crate::combat::stance::MovementPace;
use crate::combat::states::WeaponStateName;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{CombatantId, Vec2};
use crate::simulation::world::World;

impl World {
    /// Attack a hostile target with the active weapon
    pub fn attack(&mut self, attacker: CombatantId, target: CombatantId) -> Result<()> {
        {
            let a = self.combatant(attacker)?;
            let t = self.combatant(target)?;
            if t.incapacitated || !a.is_hostile_to(t) {
                return Err(SkirmishError::TargetInvalid(target));
            }
        }
        match self.combatant(attacker)?.combat_mode {
            CombatMode::Ranged => self.start_ranged_attack(attacker, target),
            CombatMode::Melee => self.start_melee_attack(attacker, target),
        }
    }

    /// Resume weapon readiness progression toward the hold state
    pub fn ready_weapon(&mut self, id: CombatantId) -> Result<()> {
        self.begin_readying(id)
    }

    pub fn set_automatic_targeting(&mut self, id: CombatantId, enabled: bool) -> Result<()> {
        let c = self.combatant_mut(id)?;
        c.uses_automatic_targeting = enabled;
        if !enabled {
            c.persistent_attack = false;
        }
        Ok(())
    }

    /// Switch to the next supported fire mode
    ///
    /// Cancels any automatic sequence in flight: its remaining scheduled
    /// shots will find the flag cleared and no-op.
    pub fn cycle_fire_mode(&mut self, id: CombatantId) -> Result<()> {
        let c = self.combatant_mut(id)?;
        let weapon = c
            .ranged_weapon
            .as_mut()
            .ok_or(SkirmishError::NoWeapon(id))?;
        weapon.cycle_fire_mode();
        c.is_automatic_firing = false;
        c.burst_shots_fired = 0;
        Ok(())
    }

    /// Order straight-line travel; silently dropped for the fallen
    pub fn move_to(&mut self, id: CombatantId, destination: Vec2, pace: MovementPace) -> Result<()> {
        let c = self.combatant_mut(id)?;
        if c.incapacitated {
            return Ok(());
        }
        c.move_target = Some(destination);
        c.move_pace = pace;
        Ok(())
    }

    pub fn set_aim_mode(&mut self, id: CombatantId, mode: AimingSpeed) -> Result<()> {
        self.combatant_mut(id)?.aiming_speed = mode;
        Ok(())
    }

    /// Switch between ranged and melee; the new weapon starts stowed
    pub fn set_combat_mode(&mut self, id: CombatantId, mode: CombatMode) -> Result<()> {
        let c = self.combatant_mut(id)?;
        if c.combat_mode == mode {
            return Ok(());
        }
        match mode {
            CombatMode::Ranged if c.ranged_weapon.is_none() => {
                return Err(SkirmishError::NoWeapon(id))
            }
            CombatMode::Melee if c.melee_weapon.is_none() => {
                return Err(SkirmishError::NoWeapon(id))
            }
            _ => {}
        }
        c.combat_mode = mode;
        c.is_attacking = false;
        c.is_automatic_firing = false;
        c.burst_shots_fired = 0;
        c.aiming_since = None;
        c.weapon_state = match mode {
            CombatMode::Ranged => WeaponStateName::Holstered,
            CombatMode::Melee => WeaponStateName::Sheathed,
        };
        Ok(())
    }

    /// Stop moving and stop re-engaging
    pub fn halt(&mut self, id: CombatantId) -> Result<()> {
        let c = self.combatant_mut(id)?;
        c.move_target = None;
        c.persistent_attack = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::combatant::Combatant;
    use crate::combat::weapons::{FireMode, MeleeWeapon, RangedWeapon};
    use crate::core::types::FactionId;

    fn duel() -> (World, CombatantId, CombatantId) {
        let mut world = World::new(9);
        let a = world.spawn(|id| {
            Combatant::new(id, "a", FactionId::new(0), Vec2::new(0.0, 0.0))
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        let b = world.spawn(|id| {
            Combatant::new(id, "b", FactionId::new(1), Vec2::new(30.0, 0.0))
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        (world, a, b)
    }

    #[test]
    fn test_attack_rejected_outside_capable_state() {
        let (mut world, a, b) = duel();
        // Still holstered
        let err = world.attack(a, b).unwrap_err();
        assert!(matches!(err, SkirmishError::InvalidStateTransition { .. }));
        assert_eq!(
            world.weapon_state(a).unwrap(),
            WeaponStateName::Holstered
        );
    }

    #[test]
    fn test_attack_rejects_friendly_target() {
        let mut world = World::new(9);
        let a = world.spawn(|id| {
            Combatant::new(id, "a", FactionId::new(0), Vec2::default())
                .with_ranged_weapon(RangedWeapon::service_pistol())
        });
        let b = world.spawn(|id| {
            Combatant::new(id, "b", FactionId::new(0), Vec2::default())
        });
        assert!(matches!(
            world.attack(a, b),
            Err(SkirmishError::TargetInvalid(_))
        ));
    }

    #[test]
    fn test_empty_magazine_starts_reload_instead_of_attack() {
        let (mut world, a, b) = duel();
        {
            let c = world.combatant_mut(a).unwrap();
            c.weapon_state = WeaponStateName::Ready;
            c.ranged_weapon.as_mut().unwrap().ammunition = 0;
        }
        assert!(matches!(
            world.attack(a, b),
            Err(SkirmishError::AmmunitionDepleted(_))
        ));
        assert!(world.combatant(a).unwrap().is_reloading);
        // Reload completes after the weapon's reload time
        world.run(181);
        assert_eq!(world.ammunition(a).unwrap(), 6);
        assert!(!world.combatant(a).unwrap().is_reloading);
    }

    #[test]
    fn test_cycle_fire_mode_interrupts_automatic_fire() {
        let mut world = World::new(9);
        let a = world.spawn(|id| {
            Combatant::new(id, "a", FactionId::new(0), Vec2::default())
                .with_ranged_weapon(RangedWeapon::submachine_gun())
        });
        {
            let c = world.combatant_mut(a).unwrap();
            c.is_automatic_firing = true;
            c.burst_shots_fired = 2;
        }
        world.cycle_fire_mode(a).unwrap();
        let c = world.combatant(a).unwrap();
        assert!(!c.is_automatic_firing);
        assert_eq!(c.burst_shots_fired, 0);
        assert_eq!(
            c.ranged_weapon.as_ref().unwrap().active_fire_mode,
            FireMode::FullAuto
        );
    }

    #[test]
    fn test_combat_mode_switch_requires_the_weapon() {
        let (mut world, a, _) = duel();
        assert!(matches!(
            world.set_combat_mode(a, CombatMode::Melee),
            Err(SkirmishError::NoWeapon(_))
        ));
        world.combatant_mut(a).unwrap().melee_weapon = Some(MeleeWeapon::combat_knife());
        world.set_combat_mode(a, CombatMode::Melee).unwrap();
        assert_eq!(
            world.weapon_state(a).unwrap(),
            WeaponStateName::Sheathed
        );
    }

    #[test]
    fn test_halt_stops_movement_and_reengagement() {
        let (mut world, a, _) = duel();
        world
            .move_to(a, Vec2::new(50.0, 0.0), MovementPace::Jog)
            .unwrap();
        world.combatant_mut(a).unwrap().persistent_attack = true;
        world.halt(a).unwrap();
        let c = world.combatant(a).unwrap();
        assert!(c.move_target.is_none());
        assert!(!c.persistent_attack);
    }
}
