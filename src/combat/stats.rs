//! Combatant attributes and weapon skills

use serde::{Deserialize, Serialize};

use crate::combat::constants::SKILL_ACCURACY_PER_LEVEL;
use crate::combat::weapons::WeaponClass;

/// Core attributes, each 1..=100 with 50 as the population average
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Stats {
    /// Ranged and melee accuracy
    pub dexterity: u32,
    /// Melee damage
    pub strength: u32,
    /// Weapon preparation speed
    pub reflexes: u32,
    /// Stress resistance and bravery
    pub coolness: u32,
}

impl Stats {
    pub fn average() -> Self {
        Self {
            dexterity: 50,
            strength: 50,
            reflexes: 50,
            coolness: 50,
        }
    }

    pub fn dexterity_modifier(&self) -> i32 {
        stat_modifier(self.dexterity)
    }

    pub fn strength_modifier(&self) -> i32 {
        stat_modifier(self.strength)
    }

    pub fn reflexes_modifier(&self) -> i32 {
        stat_modifier(self.reflexes)
    }

    pub fn coolness_modifier(&self) -> i32 {
        stat_modifier(self.coolness)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self::average()
    }
}

/// Map a 1..=100 attribute onto a -20..=+20 modifier
///
/// Symmetric around 50: 1 maps to -20, 50 to 0, 100 to +20.
pub fn stat_modifier(stat: u32) -> i32 {
    let s = stat.clamp(1, 100) as f64;
    if s >= 50.0 {
        ((s - 50.0) / 50.0 * 20.0).round() as i32
    } else {
        -((50.0 - s) / 49.0 * 20.0).round() as i32
    }
}

/// Per-weapon-class proficiency levels
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Skills {
    pub pistol: u32,
    pub rifle: u32,
    pub submachine_gun: u32,
    pub blade: u32,
    /// Speeds up weapon preparation, grants no accuracy
    pub quickdraw: u32,
}

impl Skills {
    pub fn level_for(&self, class: WeaponClass) -> u32 {
        match class {
            WeaponClass::Pistol => self.pistol,
            WeaponClass::Rifle => self.rifle,
            WeaponClass::SubmachineGun => self.submachine_gun,
        }
    }

    pub fn accuracy_bonus(&self, class: WeaponClass) -> i32 {
        self.level_for(class) as i32 * SKILL_ACCURACY_PER_LEVEL
    }

    pub fn blade_bonus(&self) -> i32 {
        self.blade as i32 * SKILL_ACCURACY_PER_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_modifier_endpoints() {
        assert_eq!(stat_modifier(1), -20);
        assert_eq!(stat_modifier(50), 0);
        assert_eq!(stat_modifier(100), 20);
    }

    #[test]
    fn test_stat_modifier_monotonic() {
        for s in 1..100 {
            assert!(stat_modifier(s) <= stat_modifier(s + 1));
        }
    }

    #[test]
    fn test_stat_modifier_clamps_out_of_range() {
        assert_eq!(stat_modifier(0), -20);
        assert_eq!(stat_modifier(250), 20);
    }

    #[test]
    fn test_skill_accuracy() {
        let skills = Skills {
            rifle: 3,
            ..Skills::default()
        };
        assert_eq!(skills.accuracy_bonus(WeaponClass::Rifle), 15);
        assert_eq!(skills.accuracy_bonus(WeaponClass::Pistol), 0);
    }
}
