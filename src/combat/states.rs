//! Weapon readiness states
//!
//! Ranged weapons progress `Holstered -> Unsling -> Ready`, then cycle
//! `Aiming -> Firing -> Recovering -> Aiming` while engaged. Melee weapons
//! progress `Sheathed -> Unsheathing -> MeleeReady` and cycle through
//! `MeleeAttack -> MeleeRecovery` per swing.
//!
//! Readiness is driven purely by scheduled events and is never touched by
//! movement.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponStateName {
    // Ranged
    Holstered,
    Unsling,
    Ready,
    Aiming,
    Firing,
    Recovering,
    // Melee
    Sheathed,
    Unsheathing,
    MeleeReady,
    MeleeAttack,
    MeleeRecovery,
}

impl WeaponStateName {
    /// Next state on the path toward the hold state, if not there yet
    ///
    /// States at or past the hold state return `None`; a ready-weapon
    /// command resumes from here, never restarts.
    pub fn next_toward_hold(&self) -> Option<WeaponStateName> {
        match self {
            WeaponStateName::Holstered => Some(WeaponStateName::Unsling),
            WeaponStateName::Unsling => Some(WeaponStateName::Ready),
            WeaponStateName::Sheathed => Some(WeaponStateName::Unsheathing),
            WeaponStateName::Unsheathing => Some(WeaponStateName::MeleeReady),
            _ => None,
        }
    }

    /// Successor a scheduled transition event may apply from this state
    ///
    /// `None` for rest and hold states, which only advance on commands
    /// or fire events.
    pub fn pending_transition(&self) -> Option<WeaponStateName> {
        match self {
            WeaponStateName::Unsling => Some(WeaponStateName::Ready),
            WeaponStateName::Unsheathing => Some(WeaponStateName::MeleeReady),
            WeaponStateName::Firing => Some(WeaponStateName::Recovering),
            WeaponStateName::Recovering => Some(WeaponStateName::Aiming),
            WeaponStateName::MeleeAttack => Some(WeaponStateName::MeleeRecovery),
            WeaponStateName::MeleeRecovery => Some(WeaponStateName::MeleeReady),
            _ => None,
        }
    }

    /// Hold states: where progression pauses absent further commands
    pub fn is_hold(&self) -> bool {
        matches!(self, WeaponStateName::Ready | WeaponStateName::MeleeReady)
    }

    /// Preparation states are sped up by reflexes and the quickdraw skill
    pub fn is_preparation(&self) -> bool {
        matches!(
            self,
            WeaponStateName::Holstered
                | WeaponStateName::Unsling
                | WeaponStateName::Sheathed
                | WeaponStateName::Unsheathing
        )
    }

    pub fn is_ranged_attack_capable(&self) -> bool {
        matches!(self, WeaponStateName::Ready | WeaponStateName::Aiming)
    }

    pub fn is_melee_attack_capable(&self) -> bool {
        matches!(self, WeaponStateName::MeleeReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranged_chain_reaches_hold() {
        let mut state = WeaponStateName::Holstered;
        let mut steps = 0;
        while let Some(next) = state.next_toward_hold() {
            state = next;
            steps += 1;
            assert!(steps <= 2, "chain must terminate");
        }
        assert_eq!(state, WeaponStateName::Ready);
    }

    #[test]
    fn test_melee_chain_reaches_hold() {
        let mut state = WeaponStateName::Sheathed;
        while let Some(next) = state.next_toward_hold() {
            state = next;
        }
        assert_eq!(state, WeaponStateName::MeleeReady);
    }

    #[test]
    fn test_rest_and_hold_states_have_no_pending_transition() {
        assert_eq!(WeaponStateName::Holstered.pending_transition(), None);
        assert_eq!(WeaponStateName::Ready.pending_transition(), None);
        assert_eq!(WeaponStateName::Aiming.pending_transition(), None);
        assert_eq!(
            WeaponStateName::Firing.pending_transition(),
            Some(WeaponStateName::Recovering)
        );
    }

    #[test]
    fn test_attack_capability() {
        assert!(WeaponStateName::Aiming.is_ranged_attack_capable());
        assert!(WeaponStateName::Ready.is_ranged_attack_capable());
        assert!(!WeaponStateName::Recovering.is_ranged_attack_capable());
        assert!(WeaponStateName::MeleeReady.is_melee_attack_capable());
        assert!(!WeaponStateName::Sheathed.is_melee_attack_capable());
    }
}
