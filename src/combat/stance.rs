//! Body posture and movement paces

use serde::{Deserialize, Serialize};

use crate::combat::constants::PRONE_TARGET_PENALTY;

/// Body posture; affects how hard the combatant is to hit and how fast
/// it can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    Standing,
    Kneeling,
    Prone,
}

impl Stance {
    /// Accuracy modifier applied to anyone shooting at this stance
    pub fn targeting_penalty(&self) -> i32 {
        match self {
            Stance::Prone => PRONE_TARGET_PENALTY,
            _ => 0,
        }
    }

    pub fn speed_multiplier(&self) -> f64 {
        match self {
            Stance::Standing => 1.0,
            Stance::Kneeling => 0.5,
            Stance::Prone => 0.25,
        }
    }
}

impl Default for Stance {
    fn default() -> Self {
        Stance::Standing
    }
}

/// Travel pace for a movement order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementPace {
    Crawl,
    Walk,
    Jog,
    Run,
}

impl MovementPace {
    /// Base ground speed in feet per second, before stance scaling
    pub fn speed_fps(&self) -> f64 {
        match self {
            MovementPace::Crawl => 1.5,
            MovementPace::Walk => 3.0,
            MovementPace::Jog => 6.0,
            MovementPace::Run => 9.0,
        }
    }

    /// Accuracy penalty for shooting while moving at this pace
    pub fn firing_penalty(&self) -> i32 {
        match self {
            MovementPace::Crawl => -10,
            MovementPace::Walk => -5,
            MovementPace::Jog => -15,
            MovementPace::Run => -25,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prone_is_harder_to_hit() {
        assert_eq!(Stance::Prone.targeting_penalty(), -15);
        assert_eq!(Stance::Standing.targeting_penalty(), 0);
    }

    #[test]
    fn test_faster_paces_shoot_worse() {
        assert!(MovementPace::Run.firing_penalty() < MovementPace::Walk.firing_penalty());
    }
}
