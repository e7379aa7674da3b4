//! Hesitation and bravery
//!
//! Being wounded briefly staggers a combatant and forces a bravery check.
//! A failed check is a lasting accuracy penalty that recovers on a timer;
//! a passed check shakes off any pending hesitation early.

use crate::combat::constants::{
    BRAVERY_CHECK_TARGET, HESITATION_LIGHT_TICKS, HESITATION_SEVERE_TICKS,
};
use crate::combat::wounds::WoundSeverity;
use crate::core::types::Tick;

/// Hesitation duration for a fresh wound; scratches do not stagger
pub fn hesitation_ticks(severity: WoundSeverity) -> Tick {
    match severity {
        WoundSeverity::Scratch => 0,
        WoundSeverity::Light => HESITATION_LIGHT_TICKS,
        WoundSeverity::Serious | WoundSeverity::Critical => HESITATION_SEVERE_TICKS,
    }
}

/// Whether a d100 roll passes the bravery check
pub fn bravery_check_passes(roll: i32, coolness_modifier: i32) -> bool {
    roll < BRAVERY_CHECK_TARGET + coolness_modifier
}
