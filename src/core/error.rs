use thiserror::Error;

use crate::combat::states::WeaponStateName;
use crate::core::types::CombatantId;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Combatant not found: {0:?}")]
    CombatantNotFound(CombatantId),

    #[error("Attack rejected for {combatant:?}: weapon in {state:?} is not attack-capable")]
    InvalidStateTransition {
        combatant: CombatantId,
        state: WeaponStateName,
    },

    #[error("Target invalid: {0:?}")]
    TargetInvalid(CombatantId),

    #[error("Ammunition depleted for {0:?}")]
    AmmunitionDepleted(CombatantId),

    #[error("Combatant {0:?} has no weapon for the requested combat mode")]
    NoWeapon(CombatantId),

    #[error("Weapon data error: {0}")]
    WeaponData(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
