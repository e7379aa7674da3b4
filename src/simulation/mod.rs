//! Tick-driven simulation: the world, its event loop, and the
//! controllers that drive combatants through engagements

mod attack;
mod commands;
mod movement;
mod readiness;
mod targeting;
mod tick;

pub mod events;
pub mod hooks;
pub mod snapshot;
pub mod world;

pub use events::EventKind;
pub use hooks::CombatHooks;
pub use snapshot::CombatantSnapshot;
pub use world::World;
