//! AliveEntity - health, stat modifiers and applied statuses of one entity

mod health;
mod statuses;

use crate::catalog::Catalog;
use crate::resistance::{ModifierTarget, StatModifier};
use crate::status::StatusTable;
use crate::tick::TickAccumulator;
use crate::types::{AffinityId, EntityId, Health, ResistanceId};
use std::sync::Arc;

/// An entity with health that can be damaged, healed, killed and carry statuses
///
/// Every mutation goes through the entity so affinity and status hooks see a
/// consistent state: `0 <= current_health <= max_health` after every call.
#[derive(Debug, Clone)]
pub struct AliveEntity {
    id: EntityId,
    catalog: Arc<Catalog>,

    max_health: Health,
    current_health: Health,

    /// Stat modifiers feeding resistance aggregation
    modifiers: Vec<StatModifier>,
    statuses: StatusTable,
    ticks: TickAccumulator,
}

impl AliveEntity {
    /// Create an entity at full health
    ///
    /// # Panics
    /// Panics if `max_health` is negative.
    pub fn new(id: impl Into<EntityId>, max_health: Health, catalog: Arc<Catalog>) -> Self {
        assert!(max_health >= 0, "Max health must be greater than or equal to zero");
        let mut entity = AliveEntity {
            id: id.into(),
            catalog,
            max_health,
            current_health: 0,
            modifiers: Vec::new(),
            statuses: StatusTable::new(),
            ticks: TickAccumulator::every_frame(),
        };
        entity.reset_health_to_max();
        entity
    }

    /// Tick statuses in fixed steps of `interval` seconds instead of once per update
    pub fn with_tick_interval(mut self, interval: f32) -> Self {
        self.ticks = TickAccumulator::fixed(interval);
        self
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn max_health(&self) -> Health {
        self.max_health
    }

    pub fn current_health(&self) -> Health {
        self.current_health
    }

    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    /// Current health as a fraction of max health (0.0 - 1.0)
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.current_health as f64 / self.max_health as f64
    }

    /// Restore full health without going through healing
    pub fn reset_health_to_max(&mut self) {
        self.current_health = self.max_health;
    }

    /// Change max health, clamping current health into the new range
    ///
    /// # Panics
    /// Panics if `max_health` is negative.
    pub fn set_max_health(&mut self, max_health: Health) {
        assert!(max_health >= 0, "Max health must be greater than or equal to zero");
        self.max_health = max_health;
        self.current_health = self.current_health.min(max_health);
    }

    // === Stat modifiers ===

    pub fn add_modifier(&mut self, modifier: StatModifier) {
        self.modifiers.push(modifier);
    }

    pub fn clear_modifiers(&mut self) {
        self.modifiers.clear();
    }

    pub fn modifiers(&self) -> &[StatModifier] {
        &self.modifiers
    }

    /// Modifiers affecting one resistance (including all-resistance modifiers)
    pub fn modifiers_for<'a>(&'a self, resistance: &'a ResistanceId) -> impl Iterator<Item = &'a StatModifier> + 'a {
        self.modifiers.iter().filter(move |m| m.applies_to(resistance))
    }

    /// Remove every modifier targeting exactly `target`
    pub fn remove_modifiers(&mut self, target: &ModifierTarget) {
        self.modifiers.retain(|m| &m.target != target);
    }

    /// Aggregated resistance against an affinity, unclamped
    pub fn resistance(&self, affinity: &AffinityId) -> f32 {
        self.catalog.resistances().resistance(self, affinity)
    }

    // === Ticking ===

    pub fn tick_interval(&self) -> Option<f32> {
        self.ticks.interval()
    }

    pub fn set_tick_interval(&mut self, interval: Option<f32>) {
        self.ticks = match interval {
            Some(step) => TickAccumulator::fixed(step),
            None => TickAccumulator::every_frame(),
        };
    }

    /// Advance time, ticking statuses once per frame or once per elapsed interval
    ///
    /// Returns the number of tick passes run.
    pub fn update(&mut self, delta_time: f32) -> usize {
        let steps = self.ticks.drain(delta_time);
        for step in &steps {
            self.tick_statuses(*step);
        }
        steps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_entity(max_health: Health) -> AliveEntity {
        AliveEntity::new("dummy", max_health, Arc::new(Catalog::with_presets()))
    }

    #[test]
    fn test_new_starts_at_full_health() {
        let entity = make_entity(100);
        assert_eq!(entity.current_health(), 100);
        assert!(entity.is_alive());
        assert!((entity.health_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_max_health_clamps_current() {
        let mut entity = make_entity(100);
        entity.set_max_health(40);
        assert_eq!(entity.current_health(), 40);

        entity.set_max_health(200);
        assert_eq!(entity.current_health(), 40);
        assert!((entity.health_fraction() - 0.2).abs() < f64::EPSILON);

        entity.reset_health_to_max();
        assert_eq!(entity.current_health(), 200);
    }

    #[test]
    fn test_zero_max_health_fraction() {
        let entity = make_entity(0);
        assert!(!entity.is_alive());
        assert_eq!(entity.health_fraction(), 0.0);
    }

    #[test]
    fn test_modifiers_for_resistance() {
        let mut entity = make_entity(100);
        let fire = ModifierTarget::resistance("fire_resistance");
        entity.add_modifier(StatModifier::flat(fire.clone(), 0.25));
        entity.add_modifier(StatModifier::flat(ModifierTarget::AllResistances, 0.1));
        entity.add_modifier(StatModifier::flat(ModifierTarget::resistance("cold_resistance"), 0.5));

        let id = ResistanceId::from("fire_resistance");
        assert_eq!(entity.modifiers_for(&id).count(), 2);

        entity.remove_modifiers(&fire);
        assert_eq!(entity.modifiers_for(&id).count(), 1);

        entity.clear_modifiers();
        assert!(entity.modifiers().is_empty());
    }

    #[test]
    fn test_resistance_from_catalog() {
        let mut entity = make_entity(100);
        assert_eq!(entity.resistance(&"fire".into()), 0.0);

        entity.add_modifier(StatModifier::flat(ModifierTarget::resistance("fire_resistance"), 0.25));
        assert!((entity.resistance(&"fire".into()) - 0.25).abs() < 1e-6);
        assert_eq!(entity.resistance(&"cold".into()), 0.0);
    }

    #[test]
    #[should_panic(expected = "Max health")]
    fn test_negative_max_health_panics() {
        make_entity(-1);
    }
}
