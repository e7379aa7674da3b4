//! Weapon definitions
//!
//! Weapons are data-defined: state durations live in a per-weapon table
//! keyed by state name, so new weapons need no code changes. A missing
//! table entry falls back to a synthetic ready duration rather than
//! leaving the owner permanently unready.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::states::WeaponStateName;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Pistol,
    Rifle,
    SubmachineGun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FireMode {
    SingleShot,
    Burst,
    FullAuto,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangedWeapon {
    pub name: String,
    pub class: WeaponClass,
    pub accuracy: i32,
    pub damage: i32,
    pub ammunition: u32,
    pub magazine_size: u32,
    /// Maximum effective range in feet
    pub max_range: f64,
    /// Ticks between successive automatic shots
    pub firing_delay: Tick,
    /// Total shots per burst trigger pull
    pub burst_size: u32,
    pub fire_modes: Vec<FireMode>,
    pub active_fire_mode: FireMode,
    pub reload_ticks: Tick,
    pub state_durations: AHashMap<WeaponStateName, Tick>,
}

impl RangedWeapon {
    /// Duration of a state, if the weapon data defines one
    pub fn state_ticks(&self, state: WeaponStateName) -> Option<Tick> {
        self.state_durations.get(&state).copied()
    }

    /// Base aim time, used both for the aiming state and as the unit of
    /// earned aim bonuses
    pub fn aim_ticks(&self) -> Option<Tick> {
        self.state_ticks(WeaponStateName::Aiming)
    }

    /// Advance to the next supported fire mode, wrapping around
    pub fn cycle_fire_mode(&mut self) {
        if self.fire_modes.is_empty() {
            return;
        }
        let idx = self
            .fire_modes
            .iter()
            .position(|m| *m == self.active_fire_mode)
            .unwrap_or(0);
        self.active_fire_mode = self.fire_modes[(idx + 1) % self.fire_modes.len()];
    }

    pub fn is_automatic(&self) -> bool {
        matches!(self.active_fire_mode, FireMode::Burst | FireMode::FullAuto)
    }

    pub fn service_pistol() -> Self {
        Self {
            name: "Service Pistol".to_string(),
            class: WeaponClass::Pistol,
            accuracy: 5,
            damage: 8,
            ammunition: 6,
            magazine_size: 6,
            max_range: 150.0,
            firing_delay: 25,
            burst_size: 1,
            fire_modes: vec![FireMode::SingleShot],
            active_fire_mode: FireMode::SingleShot,
            reload_ticks: 180,
            state_durations: AHashMap::from_iter([
                (WeaponStateName::Unsling, 60),
                (WeaponStateName::Aiming, 30),
                (WeaponStateName::Firing, 5),
                (WeaponStateName::Recovering, 30),
            ]),
        }
    }

    pub fn battle_rifle() -> Self {
        Self {
            name: "Battle Rifle".to_string(),
            class: WeaponClass::Rifle,
            accuracy: 10,
            damage: 11,
            ammunition: 20,
            magazine_size: 20,
            max_range: 450.0,
            firing_delay: 30,
            burst_size: 1,
            fire_modes: vec![FireMode::SingleShot],
            active_fire_mode: FireMode::SingleShot,
            reload_ticks: 240,
            state_durations: AHashMap::from_iter([
                (WeaponStateName::Unsling, 90),
                (WeaponStateName::Aiming, 45),
                (WeaponStateName::Firing, 5),
                (WeaponStateName::Recovering, 40),
            ]),
        }
    }

    pub fn submachine_gun() -> Self {
        Self {
            name: "Submachine Gun".to_string(),
            class: WeaponClass::SubmachineGun,
            accuracy: 0,
            damage: 7,
            ammunition: 30,
            magazine_size: 30,
            max_range: 200.0,
            firing_delay: 6,
            burst_size: 3,
            fire_modes: vec![FireMode::SingleShot, FireMode::Burst, FireMode::FullAuto],
            active_fire_mode: FireMode::Burst,
            reload_ticks: 210,
            state_durations: AHashMap::from_iter([
                (WeaponStateName::Unsling, 72),
                (WeaponStateName::Aiming, 36),
                (WeaponStateName::Firing, 5),
                (WeaponStateName::Recovering, 30),
            ]),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeleeWeapon {
    pub name: String,
    pub accuracy: i32,
    pub damage: i32,
    /// Maximum attack distance in feet
    pub reach: f64,
    pub state_durations: AHashMap<WeaponStateName, Tick>,
}

impl MeleeWeapon {
    pub fn state_ticks(&self, state: WeaponStateName) -> Option<Tick> {
        self.state_durations.get(&state).copied()
    }

    pub fn combat_knife() -> Self {
        Self {
            name: "Combat Knife".to_string(),
            accuracy: 0,
            damage: 6,
            reach: 4.0,
            state_durations: AHashMap::from_iter([
                (WeaponStateName::Unsheathing, 45),
                (WeaponStateName::MeleeAttack, 30),
                (WeaponStateName::MeleeRecovery, 45),
            ]),
        }
    }

    pub fn saber() -> Self {
        Self {
            name: "Saber".to_string(),
            accuracy: 5,
            damage: 9,
            reach: 6.5,
            state_durations: AHashMap::from_iter([
                (WeaponStateName::Unsheathing, 60),
                (WeaponStateName::MeleeAttack, 40),
                (WeaponStateName::MeleeRecovery, 60),
            ]),
        }
    }
}

/// Data-defined weapon roster, loadable from JSON by an external layer
///
/// The core performs no file I/O; callers hand it the document text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponCatalog {
    #[serde(default)]
    pub ranged: Vec<RangedWeapon>,
    #[serde(default)]
    pub melee: Vec<MeleeWeapon>,
}

impl WeaponCatalog {
    pub fn from_json(text: &str) -> Result<Self> {
        let catalog: WeaponCatalog = serde_json::from_str(text)?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for weapon in &self.ranged {
            if weapon.fire_modes.is_empty() {
                return Err(SkirmishError::WeaponData(format!(
                    "{}: no fire modes defined",
                    weapon.name
                )));
            }
            if !weapon.fire_modes.contains(&weapon.active_fire_mode) {
                return Err(SkirmishError::WeaponData(format!(
                    "{}: active fire mode not among supported modes",
                    weapon.name
                )));
            }
            if weapon.max_range <= 0.0 {
                return Err(SkirmishError::WeaponData(format!(
                    "{}: non-positive maximum range",
                    weapon.name
                )));
            }
        }
        for weapon in &self.melee {
            if weapon.reach <= 0.0 {
                return Err(SkirmishError::WeaponData(format!(
                    "{}: non-positive reach",
                    weapon.name
                )));
            }
        }
        Ok(())
    }

    pub fn ranged_by_name(&self, name: &str) -> Option<&RangedWeapon> {
        self.ranged.iter().find(|w| w.name == name)
    }

    pub fn melee_by_name(&self, name: &str) -> Option<&MeleeWeapon> {
        self.melee.iter().find(|w| w.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fire_mode_cycling_wraps() {
        let mut smg = RangedWeapon::submachine_gun();
        smg.active_fire_mode = FireMode::SingleShot;
        smg.cycle_fire_mode();
        assert_eq!(smg.active_fire_mode, FireMode::Burst);
        smg.cycle_fire_mode();
        assert_eq!(smg.active_fire_mode, FireMode::FullAuto);
        smg.cycle_fire_mode();
        assert_eq!(smg.active_fire_mode, FireMode::SingleShot);
    }

    #[test]
    fn test_single_mode_weapon_cycles_to_itself() {
        let mut pistol = RangedWeapon::service_pistol();
        pistol.cycle_fire_mode();
        assert_eq!(pistol.active_fire_mode, FireMode::SingleShot);
    }

    #[test]
    fn test_catalog_round_trip() {
        let catalog = WeaponCatalog {
            ranged: vec![RangedWeapon::service_pistol()],
            melee: vec![MeleeWeapon::combat_knife()],
        };
        let json = serde_json::to_string(&catalog).unwrap();
        let parsed = WeaponCatalog::from_json(&json).unwrap();
        assert_eq!(parsed.ranged[0].name, "Service Pistol");
        assert_eq!(
            parsed.ranged[0].state_ticks(WeaponStateName::Aiming),
            Some(30)
        );
    }

    #[test]
    fn test_catalog_rejects_inconsistent_fire_mode() {
        let mut pistol = RangedWeapon::service_pistol();
        pistol.active_fire_mode = FireMode::FullAuto;
        let catalog = WeaponCatalog {
            ranged: vec![pistol],
            melee: vec![],
        };
        let json = serde_json::to_string(&catalog).unwrap();
        assert!(WeaponCatalog::from_json(&json).is_err());
    }
}
