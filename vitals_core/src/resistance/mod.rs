//! Resistances - aggregated per-affinity damage/heal reduction
//!
//! A resistance is a statistic valid for one or more affinities. The value
//! an entity has against an affinity is the sum of the final values of every
//! resistance valid for it, each computed from the entity's modifiers.
//! Values are not clamped here; contexts clamp them when scaling amounts.

mod modifier;
mod stat_value;

pub use modifier::{ModifierKind, ModifierTarget, StatModifier};
pub use stat_value::StatValue;

use crate::config::ResistanceConfig;
use crate::entity::AliveEntity;
use crate::types::{AffinityId, ResistanceId};
use std::fmt;

/// Resistance value of an entity against an affinity
pub trait ResistanceLookup: Send + Sync + fmt::Debug {
    fn resistance(&self, entity: &AliveEntity, affinity: &AffinityId) -> f32;
}

/// A resistance statistic
#[derive(Debug, Clone, PartialEq)]
pub struct ResistanceDefinition {
    pub id: ResistanceId,
    pub name: String,
    /// Value before modifiers
    pub base: f64,
    /// Affinities this resistance is valid for
    pub applies_to: Vec<AffinityId>,
}

impl ResistanceDefinition {
    pub fn new(id: impl Into<ResistanceId>, name: impl Into<String>) -> Self {
        ResistanceDefinition {
            id: id.into(),
            name: name.into(),
            base: 0.0,
            applies_to: Vec::new(),
        }
    }

    pub fn from_config(config: &ResistanceConfig) -> Self {
        ResistanceDefinition {
            id: config.id.clone(),
            name: config.name.clone(),
            base: config.base,
            applies_to: config.applies_to.clone(),
        }
    }

    /// Mark this resistance as valid for an affinity
    pub fn for_affinity(mut self, affinity: impl Into<AffinityId>) -> Self {
        self.applies_to.push(affinity.into());
        self
    }

    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    pub fn is_valid_for(&self, affinity: &AffinityId) -> bool {
        self.applies_to.contains(affinity)
    }

    /// Final value after applying every matching modifier
    pub fn final_value<'a>(&self, modifiers: impl IntoIterator<Item = &'a StatModifier>) -> f64 {
        let mut stat = StatValue::with_base(self.base);
        for modifier in modifiers {
            if modifier.applies_to(&self.id) {
                modifier.apply_to(&mut stat);
            }
        }
        stat.compute()
    }
}

/// Registered resistances, aggregated against entity modifiers
#[derive(Debug, Clone, Default)]
pub struct ResistanceCatalog {
    definitions: Vec<ResistanceDefinition>,
}

impl ResistanceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resistance, replacing any previous one with the same id
    pub fn register(&mut self, definition: ResistanceDefinition) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn get(&self, id: &ResistanceId) -> Option<&ResistanceDefinition> {
        self.definitions.iter().find(|d| &d.id == id)
    }

    pub fn definitions(&self) -> &[ResistanceDefinition] {
        &self.definitions
    }

    /// Sum of every resistance valid for `affinity` given `modifiers`
    pub fn aggregate(&self, modifiers: &[StatModifier], affinity: &AffinityId) -> f64 {
        self.definitions
            .iter()
            .filter(|d| d.is_valid_for(affinity))
            .map(|d| d.final_value(modifiers))
            .sum()
    }
}

impl ResistanceLookup for ResistanceCatalog {
    fn resistance(&self, entity: &AliveEntity, affinity: &AffinityId) -> f32 {
        self.aggregate(entity.modifiers(), affinity) as f32
    }
}
