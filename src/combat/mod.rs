//! Combat domain: attributes, weapons, readiness states, and the
//! stateless resolver

pub mod aiming;
pub mod body_part;
pub mod combatant;
pub mod constants;
pub mod hesitation;
pub mod hit;
pub mod stance;
pub mod states;
pub mod stats;
pub mod weapons;
pub mod wounds;

pub use aiming::{AimingSpeed, EarnedAimBonus};
pub use body_part::BodyPart;
pub use combatant::{CombatMode, CombatStatistics, Combatant};
pub use stance::{MovementPace, Stance};
pub use stats::{Skills, Stats};
pub use states::WeaponStateName;
pub use weapons::{FireMode, MeleeWeapon, RangedWeapon, WeaponCatalog, WeaponClass};
pub use wounds::{Wound, WoundSeverity};
