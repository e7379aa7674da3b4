//! Hit locations

use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Chest,
    Abdomen,
    LeftShoulder,
    RightShoulder,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
}

impl BodyPart {
    /// Vital areas: a critical wound here incapacitates outright
    pub fn is_vital(&self) -> bool {
        matches!(self, BodyPart::Head | BodyPart::Chest | BodyPart::Abdomen)
    }

    /// Arm hits degrade the victim's own shooting
    pub fn is_arm(&self) -> bool {
        matches!(
            self,
            BodyPart::LeftArm | BodyPart::RightArm | BodyPart::LeftShoulder | BodyPart::RightShoulder
        )
    }

    /// Weighted location for an ordinary (neither excellent nor good) hit
    pub fn roll_scattered(rng: &mut impl Rng) -> Self {
        // Weights sum to 100
        let roll = rng.gen_range(0..100);
        match roll {
            0..=4 => BodyPart::Head,
            5..=16 => BodyPart::LeftShoulder,
            17..=28 => BodyPart::RightShoulder,
            29..=42 => BodyPart::LeftArm,
            43..=56 => BodyPart::RightArm,
            57..=77 => BodyPart::LeftLeg,
            _ => BodyPart::RightLeg,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_vital_areas() {
        assert!(BodyPart::Head.is_vital());
        assert!(BodyPart::Chest.is_vital());
        assert!(BodyPart::Abdomen.is_vital());
        assert!(!BodyPart::LeftLeg.is_vital());
    }

    #[test]
    fn test_scattered_roll_never_picks_torso() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let part = BodyPart::roll_scattered(&mut rng);
            assert!(!matches!(part, BodyPart::Chest | BodyPart::Abdomen));
        }
    }
}
