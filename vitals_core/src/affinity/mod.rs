//! Affinities - damage/heal categories and their hook sets

mod configured;

pub use configured::ConfiguredAffinity;

use crate::context::{DamageContext, DeathSaveContext, HealContext};
use crate::entity::AliveEntity;
use crate::operation::{entity, OperationResult};
use crate::types::{AffinityId, Health};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A damage/heal category (fire, cold, ...)
///
/// Every hook has a permissive default: damage and healing are permitted,
/// death is never intercepted and reactions do nothing. Implementations are
/// shared between all entities and must not keep per-entity state.
pub trait AffinityType: Send + Sync + fmt::Debug {
    /// Unique identifier of this affinity
    fn id(&self) -> AffinityId;

    /// Display name
    fn name(&self) -> &str;

    /// Checks if the target can be damaged
    fn can_be_damaged(&self, _target: &AliveEntity, _context: &DamageContext) -> OperationResult {
        entity::permitted()
    }

    /// Checks if the target can be healed
    fn can_be_healed(&self, _target: &AliveEntity, _context: &HealContext) -> OperationResult {
        entity::permitted()
    }

    /// Checks if the target should survive a lethal blow and with how much health
    fn can_save_from_death(&self, _target: &AliveEntity, _context: &DamageContext) -> DeathSaveContext {
        DeathSaveContext::none()
    }

    /// Target took non-lethal damage, payload is health lost
    fn on_damage_received(
        &self,
        _target: &mut AliveEntity,
        _context: &DamageContext,
        _result: &OperationResult<Health>,
    ) {
    }

    /// Damage was rejected by [`AffinityType::can_be_damaged`]
    fn on_damage_failed(
        &self,
        _target: &mut AliveEntity,
        _context: &DamageContext,
        _result: &OperationResult,
    ) {
    }

    /// Target died, payload is the health it lost to the killing blow
    fn on_death(
        &self,
        _target: &mut AliveEntity,
        _context: &DamageContext,
        _result: &OperationResult<Health>,
    ) {
    }

    /// Target was healed, payload is health added
    fn on_healing_received(
        &self,
        _target: &mut AliveEntity,
        _context: &HealContext,
        _result: &OperationResult<Health>,
    ) {
    }

    /// Healing was rejected by [`AffinityType::can_be_healed`]
    fn on_healing_failed(
        &self,
        _target: &mut AliveEntity,
        _context: &HealContext,
        _result: &OperationResult,
    ) {
    }

    /// Target was saved from death, payload is the health it was left with
    fn on_saved_from_death(
        &self,
        _target: &mut AliveEntity,
        _damage_context: &DamageContext,
        _save_context: &DeathSaveContext,
        _result: &OperationResult<Health>,
    ) {
    }
}

/// Affinity registry, one shared instance per id
#[derive(Debug, Clone, Default)]
pub struct AffinityRegistry {
    affinities: HashMap<AffinityId, Arc<dyn AffinityType>>,
}

impl AffinityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        AffinityRegistry {
            affinities: HashMap::new(),
        }
    }

    /// Register an affinity, replacing any previous one with the same id
    pub fn register(&mut self, affinity: Arc<dyn AffinityType>) {
        self.affinities.insert(affinity.id(), affinity);
    }

    /// Get an affinity by ID
    pub fn get(&self, id: &AffinityId) -> Option<Arc<dyn AffinityType>> {
        self.affinities.get(id).cloned()
    }

    pub fn contains(&self, id: &AffinityId) -> bool {
        self.affinities.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &AffinityId> {
        self.affinities.keys()
    }

    pub fn len(&self) -> usize {
        self.affinities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.affinities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Plain;

    impl AffinityType for Plain {
        fn id(&self) -> AffinityId {
            "plain".into()
        }

        fn name(&self) -> &str {
            "Plain"
        }
    }

    #[test]
    fn test_register_and_get() {
        let mut registry = AffinityRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(Plain));
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(&"plain".into()));
        assert!(registry.get(&"missing".into()).is_none());

        let a = registry.get(&"plain".into()).unwrap();
        let b = registry.get(&"plain".into()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
