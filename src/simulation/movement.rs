//! Per-tick movement and facing
//!
//! Straight-line travel toward the movement destination at the selected
//! pace, scaled by stance. Facing tracks the live target every tick, not
//! just at engagement start. None of this touches weapon readiness.

use crate::combat::constants::TICKS_PER_SECOND;
use crate::core::types::Vec2;
use crate::simulation::world::World;

impl World {
    pub(crate) fn run_movement(&mut self) {
        // Target positions snapshotted first so facing tracks positions
        // as of the start of the pass
        let look_at: Vec<Option<Vec2>> = self
            .combatants
            .iter()
            .map(|c| {
                c.current_target
                    .and_then(|id| self.combatant(id).ok())
                    .map(|t| t.position)
            })
            .collect();
        for (idx, target_pos) in look_at.into_iter().enumerate() {
            let c = &mut self.combatants[idx];
            if c.incapacitated {
                continue;
            }
            if let Some(dest) = c.move_target {
                let step = c.speed_fps() / TICKS_PER_SECOND as f64;
                if c.position.distance(&dest) <= step {
                    c.position = dest;
                    c.move_target = None;
                } else {
                    let direction = (dest - c.position).normalize();
                    c.position = c.position + direction * step;
                }
            }
            if let Some(pos) = target_pos {
                c.facing = c.position.angle_to(&pos);
            } else if let Some(dest) = c.move_target {
                c.facing = c.position.angle_to(&dest);
            }
        }
    }
}
