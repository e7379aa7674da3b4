//! The per-tick simulation driver
//!
//! Phase order within a tick: drain and dispatch due events (handlers
//! may schedule more), then movement, then the auto-targeting pass, then
//! the clock increments. A faulting handler is logged and isolated; it
//! never aborts the remaining events of the tick.

use tracing::warn;

use crate::core::error::Result;
use crate::core::types::{CombatantId, Tick};
use crate::simulation::events::EventKind;
use crate::simulation::world::World;

impl World {
    /// Advance the simulation a single tick
    pub fn advance(&mut self) {
        loop {
            let due = self.scheduler.drain_due();
            if due.is_empty() {
                break;
            }
            for event in due {
                if let Err(err) = self.dispatch(event.owner, event.kind) {
                    warn!(owner = ?event.owner, kind = ?event.kind, %err, "event handler failed");
                }
            }
        }
        self.run_movement();
        self.run_auto_targeting();
        self.scheduler.advance_clock();
    }

    /// Advance a fixed number of ticks
    pub fn run(&mut self, ticks: Tick) {
        for _ in 0..ticks {
            self.advance();
        }
    }

    /// Run until at most one faction stands or the tick limit is hit;
    /// returns the stopping tick
    pub fn run_until_decided(&mut self, limit: Tick) -> Tick {
        while self.current_tick() < limit && self.active_factions().len() > 1 {
            self.advance();
        }
        self.current_tick()
    }

    fn dispatch(&mut self, owner: CombatantId, kind: EventKind) -> Result<()> {
        match kind {
            EventKind::StateTransition { to, sequence } => {
                self.handle_state_transition(owner, to, sequence)
            }
            EventKind::Fire {
                target,
                shot_number,
                sequence,
            } => self.handle_fire(owner, target, shot_number, sequence),
            EventKind::MeleeImpact { target, sequence } => {
                self.handle_melee_impact(owner, target, sequence)
            }
            EventKind::ReloadComplete => self.handle_reload_complete(owner),
            EventKind::HesitationEnd => self.handle_hesitation_end(owner),
            EventKind::BraveryRecovery => self.handle_bravery_recovery(owner),
        }
    }
}
