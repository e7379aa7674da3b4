//! Combat tuning constants
//!
//! All accuracy values are percentage points added to (or subtracted from)
//! the base hit chance before clamping.

use crate::core::types::Tick;

/// Simulation clock rate
pub const TICKS_PER_SECOND: Tick = 60;

/// Starting point of every hit-chance computation
pub const BASE_HIT_CHANCE: i32 = 50;

/// Hit chance is clamped to this range after all modifiers
pub const MIN_HIT_CHANCE: i32 = 1;
pub const MAX_HIT_CHANCE: i32 = 99;

/// Every automatic shot after the first fires unaimed
pub const AUTOMATIC_FOLLOW_UP_PENALTY: i32 = -20;

/// First deliberate shot against a target not previously engaged
pub const FIRST_TARGET_PENALTY: i32 = -15;

/// Being shot at (hit or miss) suppresses the target for this long
pub const SUPPRESSION_TICKS: Tick = 180;
pub const SUPPRESSION_PENALTY: i32 = -20;

/// Bravery: d100 at or above `BRAVERY_CHECK_TARGET + coolness modifier`
/// is a failure
pub const BRAVERY_CHECK_TARGET: i32 = 50;
pub const BRAVERY_FAILURE_PENALTY: i32 = -10;
pub const BRAVERY_RECOVERY_TICKS: Tick = 180;

pub const HESITATION_LIGHT_TICKS: Tick = 15;
pub const HESITATION_SEVERE_TICKS: Tick = 60;

/// Substitute duration when weapon data omits a state entry
pub const SYNTHETIC_READY_TICKS: Tick = 60;

/// Accuracy granted per level of the matching weapon skill
pub const SKILL_ACCURACY_PER_LEVEL: i32 = 5;

/// Penalty for shooting at a prone target
pub const PRONE_TARGET_PENALTY: i32 = -15;

/// Range modifier: +10 at the muzzle, tapering to 0 at
/// `RANGE_TAPER_FRACTION` of maximum range, then down to -20 at maximum
pub const RANGE_CLOSE_BONUS: f64 = 10.0;
pub const RANGE_MAX_PENALTY: f64 = -20.0;
pub const RANGE_TAPER_FRACTION: f64 = 0.3;

/// Penalty per foot-per-second of target speed perpendicular to the shot
pub const TARGET_SPEED_PENALTY_PER_FPS: f64 = 2.0;

/// Preparation-state speed factors (unsling, unsheathe)
pub const REFLEX_PREP_FACTOR: f64 = 0.015;
pub const QUICKDRAW_PREP_FACTOR: f64 = 0.08;

pub const HEADSHOT_DAMAGE_MULTIPLIER: f64 = 1.5;
pub const LIGHT_WOUND_DAMAGE_FRACTION: f64 = 0.4;

/// Roll-quality tiers: a roll under this fraction of the hit chance
/// counts as an excellent / good shot
pub const EXCELLENT_SHOT_FRACTION: f64 = 0.2;
pub const GOOD_SHOT_FRACTION: f64 = 0.7;

pub const EXCELLENT_HEADSHOT_CHANCE: i32 = 15;
pub const GOOD_HEADSHOT_CHANCE: i32 = 2;
