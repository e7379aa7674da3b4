//! The simulation world: roster, clock, event queue, and randomness
//!
//! All combat state lives here and is passed explicitly; there are no
//! globals. Execution is single-threaded and tick-ordered, so replay is
//! deterministic for a fixed seed.

use ahash::AHashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::combat::combatant::{CombatStatistics, Combatant};
use crate::combat::states::WeaponStateName;
use crate::combat::wounds::Wound;
use crate::core::error::{Result, SkirmishError};
use crate::core::types::{CombatantId, FactionId, Tick};
use crate::scheduler::EventScheduler;
use crate::simulation::events::EventKind;
use crate::simulation::hooks::{CombatHooks, Notification};

pub struct World {
    pub(crate) combatants: Vec<Combatant>,
    index: AHashMap<CombatantId, usize>,
    pub(crate) scheduler: EventScheduler<EventKind>,
    pub(crate) rng: ChaCha8Rng,
    hooks: Option<Box<dyn CombatHooks>>,
}

impl World {
    pub fn new(seed: u64) -> Self {
        Self {
            combatants: Vec::new(),
            index: AHashMap::new(),
            scheduler: EventScheduler::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            hooks: None,
        }
    }

    /// Add a combatant, handing the builder its assigned id
    pub fn spawn(&mut self, build: impl FnOnce(CombatantId) -> Combatant) -> CombatantId {
        let id = CombatantId::new(self.combatants.len() as u32);
        let combatant = build(id);
        debug_assert_eq!(combatant.id, id);
        self.index.insert(id, self.combatants.len());
        self.combatants.push(combatant);
        id
    }

    pub fn current_tick(&self) -> Tick {
        self.scheduler.current_tick()
    }

    pub fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    pub(crate) fn idx(&self, id: CombatantId) -> Result<usize> {
        self.index
            .get(&id)
            .copied()
            .ok_or(SkirmishError::CombatantNotFound(id))
    }

    pub fn combatant(&self, id: CombatantId) -> Result<&Combatant> {
        let idx = self.idx(id)?;
        Ok(&self.combatants[idx])
    }

    /// Direct mutable access, for roster setup and editor layers
    pub fn combatant_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        let idx = self.idx(id)?;
        Ok(&mut self.combatants[idx])
    }

    // --- read-only queries for display layers ---

    pub fn weapon_state(&self, id: CombatantId) -> Result<WeaponStateName> {
        Ok(self.combatant(id)?.weapon_state)
    }

    pub fn health(&self, id: CombatantId) -> Result<i32> {
        Ok(self.combatant(id)?.health)
    }

    pub fn ammunition(&self, id: CombatantId) -> Result<u32> {
        let combatant = self.combatant(id)?;
        combatant
            .ranged_weapon
            .as_ref()
            .map(|w| w.ammunition)
            .ok_or(SkirmishError::NoWeapon(id))
    }

    pub fn target(&self, id: CombatantId) -> Result<Option<CombatantId>> {
        Ok(self.combatant(id)?.current_target)
    }

    pub fn wounds(&self, id: CombatantId) -> Result<&[Wound]> {
        Ok(&self.combatant(id)?.wounds)
    }

    pub fn statistics(&self, id: CombatantId) -> Result<&CombatStatistics> {
        Ok(&self.combatant(id)?.statistics)
    }

    /// Factions with at least one combatant still standing
    pub fn active_factions(&self) -> Vec<FactionId> {
        let mut factions = Vec::new();
        for combatant in &self.combatants {
            if !combatant.incapacitated && !factions.contains(&combatant.faction) {
                factions.push(combatant.faction);
            }
        }
        factions
    }

    pub fn set_hooks(&mut self, hooks: Box<dyn CombatHooks>) {
        self.hooks = Some(hooks);
    }

    /// Deliver buffered notifications; a missing hook is a silent skip
    pub(crate) fn notify_all(&mut self, notifications: Vec<Notification>) {
        let tick = self.scheduler.current_tick();
        if let Some(hooks) = self.hooks.as_deref_mut() {
            for notification in notifications {
                notification.deliver(hooks, tick);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;

    #[test]
    fn test_spawn_assigns_dense_ids() {
        let mut world = World::new(0);
        let a = world.spawn(|id| {
            Combatant::new(id, "a", FactionId::new(0), Vec2::default())
        });
        let b = world.spawn(|id| {
            Combatant::new(id, "b", FactionId::new(1), Vec2::default())
        });
        assert_eq!(a, CombatantId::new(0));
        assert_eq!(b, CombatantId::new(1));
        assert_eq!(world.combatant(b).unwrap().name, "b");
    }

    #[test]
    fn test_unknown_id_is_an_error() {
        let world = World::new(0);
        assert!(matches!(
            world.combatant(CombatantId::new(9)),
            Err(SkirmishError::CombatantNotFound(_))
        ));
    }

    #[test]
    fn test_active_factions_ignores_the_fallen() {
        let mut world = World::new(0);
        world.spawn(|id| Combatant::new(id, "a", FactionId::new(0), Vec2::default()));
        let b = world.spawn(|id| Combatant::new(id, "b", FactionId::new(1), Vec2::default()));
        assert_eq!(world.active_factions().len(), 2);
        world.combatant_mut(b).unwrap().incapacitate();
        assert_eq!(world.active_factions(), vec![FactionId::new(0)]);
    }
}
