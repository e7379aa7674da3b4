//! Simulation event payloads
//!
//! Events carry data, not behavior: the world dispatches each drained
//! event against its owner, and every handler re-validates its
//! preconditions before mutating anything. Stale events (owner down,
//! weapon state changed, automatic fire interrupted, attack sequence
//! superseded) no-op.
//!
//! `sequence` is the owner's attack-sequence counter at scheduling time.
//! Handlers compare it against the live counter, so events from a
//! superseded sequence fall through without effect.

use crate::combat::states::WeaponStateName;
use crate::core::types::CombatantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Weapon readiness progression into `to`
    StateTransition { to: WeaponStateName, sequence: u64 },
    /// A trigger pull lands; `shot_number` is 1-based within the sequence
    Fire {
        target: CombatantId,
        shot_number: u32,
        sequence: u64,
    },
    /// A melee swing connects or whiffs
    MeleeImpact { target: CombatantId, sequence: u64 },
    ReloadComplete,
    HesitationEnd,
    BraveryRecovery,
}
