//! Tick-driven tactical combat simulation core
//!
//! Combatants advance through weapon-readiness state machines, acquire
//! targets automatically, and resolve attacks stochastically, all
//! ordered by a discrete-event scheduler over a 60-ticks-per-second
//! clock. Rendering, input, and persistence live outside the core and
//! interact through commands, read-only queries, snapshots, and optional
//! notification hooks.

pub mod combat;
pub mod core;
pub mod scheduler;
pub mod simulation;

pub use crate::core::{CombatantId, FactionId, Result, SkirmishError, Tick, Vec2};
pub use crate::simulation::{CombatHooks, CombatantSnapshot, World};
