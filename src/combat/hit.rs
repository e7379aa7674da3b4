//! Stateless hit and impact resolution
//!
//! Pure functions over explicit inputs: callers assemble the shot
//! parameters, hand in the randomness, and apply the returned outcome.
//! Nothing here mutates a combatant.

use rand::Rng;

use crate::combat::body_part::BodyPart;
use crate::combat::constants::{
    AUTOMATIC_FOLLOW_UP_PENALTY, BASE_HIT_CHANCE, EXCELLENT_HEADSHOT_CHANCE,
    EXCELLENT_SHOT_FRACTION, GOOD_HEADSHOT_CHANCE, GOOD_SHOT_FRACTION, MAX_HIT_CHANCE,
    MIN_HIT_CHANCE, RANGE_CLOSE_BONUS, RANGE_MAX_PENALTY, RANGE_TAPER_FRACTION,
    TARGET_SPEED_PENALTY_PER_FPS,
};
use crate::combat::stance::{MovementPace, Stance};
use crate::combat::wounds::{roll_severity, wound_damage, WoundSeverity};

/// Everything that feeds a ranged hit-chance computation
#[derive(Debug, Clone)]
pub struct RangedShotSpec {
    pub weapon_accuracy: i32,
    pub distance: f64,
    pub max_range: f64,
    pub dexterity_modifier: i32,
    /// Suppression stress, never positive
    pub stress_modifier: i32,
    pub shooter_pace: Option<MovementPace>,
    /// Earned bonus if any, else the selected aiming mode
    pub aim_modifier: i32,
    /// Automatic shot two or later: fixed penalty replaces aim entirely
    pub follow_up_shot: bool,
    pub target_stance: Stance,
    pub target_perpendicular_fps: f64,
    pub wound_penalty: i32,
    pub skill_bonus: i32,
    pub bravery_penalty: i32,
    /// 0 once the target has been engaged before, or under a waiver
    pub first_target_penalty: i32,
}

/// Distance-based accuracy modifier
///
/// +10 at the muzzle tapering to 0 at 30% of maximum range, then falling
/// linearly to -20 at maximum range.
pub fn range_modifier(distance: f64, max_range: f64) -> i32 {
    if max_range <= 0.0 {
        return RANGE_MAX_PENALTY as i32;
    }
    let frac = (distance / max_range).clamp(0.0, 1.0);
    if frac <= RANGE_TAPER_FRACTION {
        (RANGE_CLOSE_BONUS * (1.0 - frac / RANGE_TAPER_FRACTION)).round() as i32
    } else {
        (RANGE_MAX_PENALTY * (frac - RANGE_TAPER_FRACTION) / (1.0 - RANGE_TAPER_FRACTION)).round()
            as i32
    }
}

fn target_movement_penalty(perpendicular_fps: f64) -> i32 {
    -(TARGET_SPEED_PENALTY_PER_FPS * perpendicular_fps).round() as i32
}

/// Final percentage chance to hit, clamped to [1, 99]
pub fn ranged_hit_chance(spec: &RangedShotSpec) -> i32 {
    let mut chance = BASE_HIT_CHANCE
        + spec.dexterity_modifier
        + spec.stress_modifier
        + range_modifier(spec.distance, spec.max_range)
        + spec.weapon_accuracy
        + spec.skill_bonus
        + spec.wound_penalty
        + spec.bravery_penalty
        + spec.target_stance.targeting_penalty()
        + target_movement_penalty(spec.target_perpendicular_fps);
    if let Some(pace) = spec.shooter_pace {
        chance += pace.firing_penalty();
    }
    if spec.follow_up_shot {
        chance += AUTOMATIC_FOLLOW_UP_PENALTY;
    } else {
        chance += spec.aim_modifier + spec.first_target_penalty;
    }
    chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

#[derive(Debug, Clone)]
pub struct MeleeStrikeSpec {
    pub weapon_accuracy: i32,
    pub dexterity_modifier: i32,
    pub stress_modifier: i32,
    pub target_stance: Stance,
    pub target_perpendicular_fps: f64,
    pub wound_penalty: i32,
    pub skill_bonus: i32,
    pub bravery_penalty: i32,
}

pub fn melee_hit_chance(spec: &MeleeStrikeSpec) -> i32 {
    let chance = BASE_HIT_CHANCE
        + spec.dexterity_modifier
        + spec.stress_modifier
        + spec.weapon_accuracy
        + spec.skill_bonus
        + spec.wound_penalty
        + spec.bravery_penalty
        + spec.target_stance.targeting_penalty()
        + target_movement_penalty(spec.target_perpendicular_fps);
    chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

/// How decisively the roll beat the hit chance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotQuality {
    /// Under 20% of the chance: precise placement, always critical
    Excellent,
    /// Under 70%: solid torso hit
    Good,
    /// Barely connected: scattered over limbs
    Ordinary,
}

pub fn shot_quality(roll: i32, chance: i32) -> ShotQuality {
    let quality = roll as f64 / chance as f64;
    if quality < EXCELLENT_SHOT_FRACTION {
        ShotQuality::Excellent
    } else if quality < GOOD_SHOT_FRACTION {
        ShotQuality::Good
    } else {
        ShotQuality::Ordinary
    }
}

pub fn roll_hit_location(quality: ShotQuality, rng: &mut impl Rng) -> BodyPart {
    match quality {
        ShotQuality::Excellent => {
            if rng.gen_range(0..100) < EXCELLENT_HEADSHOT_CHANCE {
                BodyPart::Head
            } else {
                BodyPart::Chest
            }
        }
        ShotQuality::Good => {
            if rng.gen_range(0..100) < GOOD_HEADSHOT_CHANCE {
                BodyPart::Head
            } else if rng.gen_bool(0.5) {
                BodyPart::Chest
            } else {
                BodyPart::Abdomen
            }
        }
        ShotQuality::Ordinary => BodyPart::roll_scattered(rng),
    }
}

/// A resolved hit before it is applied to the victim
#[derive(Debug, Clone, Copy)]
pub struct Impact {
    pub body_part: BodyPart,
    pub severity: WoundSeverity,
    pub damage: i32,
}

pub fn resolve_impact(quality: ShotQuality, weapon_damage: i32, rng: &mut impl Rng) -> Impact {
    let body_part = roll_hit_location(quality, rng);
    let severity = match quality {
        ShotQuality::Excellent => WoundSeverity::Critical,
        _ => roll_severity(body_part, rng),
    };
    Impact {
        body_part,
        severity,
        damage: wound_damage(weapon_damage, severity, body_part),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn baseline_spec() -> RangedShotSpec {
        RangedShotSpec {
            weapon_accuracy: 0,
            distance: 0.0,
            max_range: 150.0,
            dexterity_modifier: 0,
            stress_modifier: 0,
            shooter_pace: None,
            aim_modifier: 0,
            follow_up_shot: false,
            target_stance: Stance::Standing,
            target_perpendicular_fps: 0.0,
            wound_penalty: 0,
            skill_bonus: 0,
            bravery_penalty: 0,
            first_target_penalty: 0,
        }
    }

    #[test]
    fn test_range_modifier_shape() {
        assert_eq!(range_modifier(0.0, 100.0), 10);
        assert_eq!(range_modifier(30.0, 100.0), 0);
        assert_eq!(range_modifier(100.0, 100.0), -20);
        assert_eq!(range_modifier(65.0, 100.0), -10);
        // Beyond maximum range clamps at the floor
        assert_eq!(range_modifier(500.0, 100.0), -20);
    }

    #[test]
    fn test_pistol_shot_at_short_range() {
        // 50 base + 5 dexterity + 3 range (30ft of 150ft) + 5 weapon = 63
        let spec = RangedShotSpec {
            weapon_accuracy: 5,
            distance: 30.0,
            dexterity_modifier: 5,
            ..baseline_spec()
        };
        assert_eq!(ranged_hit_chance(&spec), 63);
        // A draw of 45 against 63 hits, though past the clean-hit
        // fraction (45/63 > 0.7); 40 is still inside it
        assert_eq!(shot_quality(45, 63), ShotQuality::Ordinary);
        assert_eq!(shot_quality(40, 63), ShotQuality::Good);
    }

    #[test]
    fn test_follow_up_replaces_aim_with_fixed_penalty() {
        let mut spec = baseline_spec();
        spec.aim_modifier = 15;
        spec.first_target_penalty = -15;
        let first = ranged_hit_chance(&spec);
        spec.follow_up_shot = true;
        let follow_up = ranged_hit_chance(&spec);
        // Aim and first-target modifiers vanish; only the flat -20 applies
        assert_eq!(first - follow_up, 15 - 15 - (-20));
    }

    #[test]
    fn test_chance_clamps() {
        let mut spec = baseline_spec();
        spec.wound_penalty = -200;
        assert_eq!(ranged_hit_chance(&spec), 1);
        spec.wound_penalty = 0;
        spec.skill_bonus = 200;
        assert_eq!(ranged_hit_chance(&spec), 99);
    }

    #[test]
    fn test_moving_target_is_harder() {
        let mut spec = baseline_spec();
        let still = ranged_hit_chance(&spec);
        spec.target_perpendicular_fps = 6.0;
        assert_eq!(still - ranged_hit_chance(&spec), 12);
    }

    #[test]
    fn test_excellent_shots_are_critical() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let impact = resolve_impact(ShotQuality::Excellent, 8, &mut rng);
            assert_eq!(impact.severity, WoundSeverity::Critical);
            assert!(impact.body_part.is_vital());
        }
    }

    #[test]
    fn test_good_shots_land_in_the_torso_or_head() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..50 {
            let part = roll_hit_location(ShotQuality::Good, &mut rng);
            assert!(part.is_vital());
        }
    }
}
