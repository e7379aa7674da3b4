//! Wounds: severity tiers, damage scaling, lingering accuracy penalties

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::body_part::BodyPart;
use crate::combat::constants::{HEADSHOT_DAMAGE_MULTIPLIER, LIGHT_WOUND_DAMAGE_FRACTION};
use crate::core::types::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WoundSeverity {
    Scratch,
    Light,
    Serious,
    Critical,
}

/// A single injury; immutable once appended to the victim's wound list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wound {
    pub body_part: BodyPart,
    pub severity: WoundSeverity,
    pub damage: i32,
    /// Name of the weapon that caused it
    pub weapon: String,
    pub tick: Tick,
}

impl Wound {
    /// Accuracy penalty this wound imposes on its own bearer
    ///
    /// Head and arm wounds degrade shooting point for point; elsewhere
    /// only the severity matters.
    pub fn accuracy_penalty(&self) -> i32 {
        if self.body_part == BodyPart::Head || self.body_part.is_arm() {
            return -self.damage;
        }
        match self.severity {
            WoundSeverity::Scratch => 0,
            WoundSeverity::Light => -1,
            WoundSeverity::Serious => -2,
            WoundSeverity::Critical => -self.damage,
        }
    }
}

/// Severity for an ordinary hit, rolled against per-location tables
///
/// Vital areas wound harder than limbs. Excellent shots bypass this and
/// are always critical.
pub fn roll_severity(part: BodyPart, rng: &mut impl Rng) -> WoundSeverity {
    let roll = rng.gen_range(0..100);
    if part.is_vital() {
        match roll {
            0..=29 => WoundSeverity::Critical,
            30..=69 => WoundSeverity::Serious,
            70..=94 => WoundSeverity::Light,
            _ => WoundSeverity::Scratch,
        }
    } else {
        match roll {
            0..=9 => WoundSeverity::Critical,
            10..=34 => WoundSeverity::Serious,
            35..=79 => WoundSeverity::Light,
            _ => WoundSeverity::Scratch,
        }
    }
}

/// Numeric damage for a wound of the given severity
pub fn wound_damage(weapon_damage: i32, severity: WoundSeverity, part: BodyPart) -> i32 {
    let base = match severity {
        WoundSeverity::Critical | WoundSeverity::Serious => weapon_damage,
        WoundSeverity::Light => {
            ((weapon_damage as f64 * LIGHT_WOUND_DAMAGE_FRACTION).round() as i32).max(1)
        }
        WoundSeverity::Scratch => 1,
    };
    if part == BodyPart::Head {
        (base as f64 * HEADSHOT_DAMAGE_MULTIPLIER).round() as i32
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_damage_scaling() {
        assert_eq!(wound_damage(10, WoundSeverity::Critical, BodyPart::Chest), 10);
        assert_eq!(wound_damage(10, WoundSeverity::Serious, BodyPart::Chest), 10);
        assert_eq!(wound_damage(10, WoundSeverity::Light, BodyPart::Chest), 4);
        assert_eq!(wound_damage(10, WoundSeverity::Scratch, BodyPart::Chest), 1);
    }

    #[test]
    fn test_light_wound_damage_floor() {
        assert_eq!(wound_damage(1, WoundSeverity::Light, BodyPart::LeftLeg), 1);
    }

    #[test]
    fn test_headshot_multiplier() {
        assert_eq!(wound_damage(10, WoundSeverity::Critical, BodyPart::Head), 15);
    }

    #[test]
    fn test_arm_wound_penalty_scales_with_damage() {
        let wound = Wound {
            body_part: BodyPart::RightArm,
            severity: WoundSeverity::Light,
            damage: 4,
            weapon: "test".to_string(),
            tick: 0,
        };
        assert_eq!(wound.accuracy_penalty(), -4);
    }

    #[test]
    fn test_torso_wound_penalty_by_severity() {
        let wound = Wound {
            body_part: BodyPart::Chest,
            severity: WoundSeverity::Serious,
            damage: 10,
            weapon: "test".to_string(),
            tick: 0,
        };
        assert_eq!(wound.accuracy_penalty(), -2);
    }
}
