//! World - owns entities and drives their ticks

use crate::catalog::Catalog;
use crate::entity::AliveEntity;
use crate::tick::{TickDriver, TickSystem};
use crate::types::{EntityId, Health};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Entity store sharing one catalog
///
/// Active entities are subscribed to the tick system and updated in
/// subscription order. Inactive entities keep their state but stop ticking.
#[derive(Debug)]
pub struct World {
    catalog: Arc<Catalog>,
    entities: HashMap<EntityId, AliveEntity>,
    ticks: TickSystem,
}

impl World {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        World {
            catalog,
            entities: HashMap::new(),
            ticks: TickSystem::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Create an active entity at full health, replacing any entity with the same id
    pub fn spawn(&mut self, id: impl Into<EntityId>, max_health: Health) -> &mut AliveEntity {
        let entity = AliveEntity::new(id, max_health, Arc::clone(&self.catalog));
        self.insert(entity)
    }

    /// Add an entity and activate it
    pub fn insert(&mut self, entity: AliveEntity) -> &mut AliveEntity {
        let id = entity.id().clone();
        debug!(entity = %id, max_health = entity.max_health(), "entity spawned");
        self.ticks.subscribe(id.clone());
        match self.entities.entry(id) {
            Entry::Occupied(mut occupied) => {
                occupied.insert(entity);
                occupied.into_mut()
            }
            Entry::Vacant(vacant) => vacant.insert(entity),
        }
    }

    /// Remove an entity, returning it
    pub fn despawn(&mut self, id: &EntityId) -> Option<AliveEntity> {
        self.ticks.unsubscribe(id);
        let removed = self.entities.remove(id);
        if removed.is_some() {
            debug!(entity = %id, "entity despawned");
        }
        removed
    }

    /// Resume ticking an entity. False when unknown or already active.
    pub fn activate(&mut self, id: &EntityId) -> bool {
        self.entities.contains_key(id) && self.ticks.subscribe(id.clone())
    }

    /// Stop ticking an entity. False when unknown or already inactive.
    pub fn deactivate(&mut self, id: &EntityId) -> bool {
        self.ticks.unsubscribe(id)
    }

    pub fn is_active(&self, id: &EntityId) -> bool {
        self.ticks.is_subscribed(id)
    }

    pub fn get(&self, id: &EntityId) -> Option<&AliveEntity> {
        self.entities.get(id)
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut AliveEntity> {
        self.entities.get_mut(id)
    }

    pub fn entities(&self) -> impl Iterator<Item = &AliveEntity> {
        self.entities.values()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Update every active entity, returns the number of tick passes run
    pub fn update(&mut self, delta_time: f32) -> usize {
        let mut passes = 0;
        for id in self.ticks.subscribers().to_vec() {
            if let Some(entity) = self.entities.get_mut(&id) {
                passes += entity.update(delta_time);
            }
        }
        passes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::BurningStatus;
    use crate::types::{ActionSource, StatusFlags};

    fn make_world() -> World {
        World::new(Arc::new(Catalog::with_presets()))
    }

    #[test]
    fn test_burning_damage_does_not_depend_on_frame_rate() {
        let mut world = make_world();
        world
            .spawn("goblin", 100)
            .apply_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);
        world
            .spawn("ogre", 1000)
            .apply_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::Internal);

        // 10s at 60 fps
        for _ in 0..600 {
            world.update(1.0 / 60.0);
        }

        // 4 dps, 1 stack: nominal 40 damage
        let goblin = world.get(&"goblin".into()).map(|e| e.current_health());
        assert!(matches!(goblin, Some(59..=61)), "goblin at {goblin:?}");
        // 2 stacks: nominal 80 damage
        let ogre = world.get(&"ogre".into()).map(|e| e.current_health());
        assert!(matches!(ogre, Some(919..=921)), "ogre at {ogre:?}");
    }

    #[test]
    fn test_spawn_activates() {
        let mut world = make_world();
        world.spawn("goblin", 50);
        let id = EntityId::from("goblin");

        assert!(world.is_active(&id));
        assert_eq!(world.get(&id).map(|e| e.current_health()), Some(50));
        assert_eq!(world.update(0.1), 1);
    }

    #[test]
    fn test_deactivated_entities_keep_state_but_stop_ticking() {
        let mut world = make_world();
        world
            .spawn("goblin", 50)
            .apply_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);
        let id = EntityId::from("goblin");

        assert!(world.deactivate(&id));
        assert_eq!(world.update(1.0), 0);
        assert_eq!(world.get(&id).unwrap().current_health(), 50);
        assert!(world.get(&id).unwrap().has_status_typed::<BurningStatus>());

        assert!(world.activate(&id));
        assert!(!world.activate(&id));
        world.update(1.0);
        assert_eq!(world.get(&id).unwrap().current_health(), 46);
    }

    #[test]
    fn test_fixed_interval_entities_catch_up() {
        let mut world = make_world();
        let entity = AliveEntity::new("slow", 10, Arc::clone(world.catalog())).with_tick_interval(0.5);
        world.insert(entity);

        assert_eq!(world.update(1.2), 2);
        assert_eq!(world.update(0.1), 0);
    }

    #[test]
    fn test_despawn() {
        let mut world = make_world();
        world.spawn("goblin", 50);
        let id = EntityId::from("goblin");

        assert!(world.despawn(&id).is_some());
        assert!(!world.is_active(&id));
        assert!(!world.activate(&id));
        assert!(world.is_empty());
    }
}
