//! Aiming modes and earned aim bonuses

use serde::{Deserialize, Serialize};

use crate::core::types::Tick;

/// Selected trade-off between aim time and accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimingSpeed {
    /// +15 accuracy, twice the aim time
    Careful,
    Normal,
    /// -20 accuracy, half the aim time
    Quick,
}

impl AimingSpeed {
    pub fn accuracy_modifier(&self) -> i32 {
        match self {
            AimingSpeed::Careful => 15,
            AimingSpeed::Normal => 0,
            AimingSpeed::Quick => -20,
        }
    }

    pub fn time_multiplier(&self) -> f64 {
        match self {
            AimingSpeed::Careful => 2.0,
            AimingSpeed::Normal => 1.0,
            AimingSpeed::Quick => 0.5,
        }
    }
}

impl Default for AimingSpeed {
    fn default() -> Self {
        AimingSpeed::Normal
    }
}

/// Bonus earned by holding aim on a target, replacing the selected mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EarnedAimBonus {
    /// Held for one full aim duration
    Normal,
    /// Held for two: +15
    Careful,
    /// Held for three: +15, doubled skill bonus, first-target penalty
    /// waived; requires at least one skill level with the weapon
    VeryCareful,
}

impl EarnedAimBonus {
    /// Bonus for time spent aiming, measured in the weapon's base aim
    /// duration
    pub fn from_held_aim(held: Tick, base_aim: Tick, skill_level: u32) -> Option<Self> {
        if base_aim == 0 {
            return None;
        }
        if held >= base_aim * 3 && skill_level >= 1 {
            Some(EarnedAimBonus::VeryCareful)
        } else if held >= base_aim * 2 {
            Some(EarnedAimBonus::Careful)
        } else if held >= base_aim {
            Some(EarnedAimBonus::Normal)
        } else {
            None
        }
    }

    pub fn accuracy_modifier(&self) -> i32 {
        match self {
            EarnedAimBonus::Normal => 0,
            EarnedAimBonus::Careful | EarnedAimBonus::VeryCareful => 15,
        }
    }

    pub fn doubles_skill_bonus(&self) -> bool {
        matches!(self, EarnedAimBonus::VeryCareful)
    }

    pub fn waives_first_target_penalty(&self) -> bool {
        matches!(self, EarnedAimBonus::VeryCareful)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earned_bonus_thresholds() {
        assert_eq!(EarnedAimBonus::from_held_aim(29, 30, 1), None);
        assert_eq!(
            EarnedAimBonus::from_held_aim(30, 30, 1),
            Some(EarnedAimBonus::Normal)
        );
        assert_eq!(
            EarnedAimBonus::from_held_aim(60, 30, 1),
            Some(EarnedAimBonus::Careful)
        );
        assert_eq!(
            EarnedAimBonus::from_held_aim(90, 30, 1),
            Some(EarnedAimBonus::VeryCareful)
        );
    }

    #[test]
    fn test_very_careful_requires_skill() {
        assert_eq!(
            EarnedAimBonus::from_held_aim(90, 30, 0),
            Some(EarnedAimBonus::Careful)
        );
    }
}
