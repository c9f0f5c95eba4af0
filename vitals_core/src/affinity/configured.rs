//! ConfiguredAffinity - affinity defined in TOML

use super::AffinityType;
use crate::config::AffinityConfig;
use crate::context::{DamageContext, DeathSaveContext, HealContext};
use crate::entity::AliveEntity;
use crate::operation::{entity, OperationResult};
use crate::types::{AffinityId, Health};

/// Data driven affinity
#[derive(Debug, Clone)]
pub struct ConfiguredAffinity {
    id: AffinityId,
    name: String,
    damageable: bool,
    healable: bool,
    save_from_death_at: Option<Health>,
}

impl ConfiguredAffinity {
    pub fn new(id: impl Into<AffinityId>, name: impl Into<String>) -> Self {
        ConfiguredAffinity {
            id: id.into(),
            name: name.into(),
            damageable: true,
            healable: true,
            save_from_death_at: None,
        }
    }

    pub fn from_config(config: &AffinityConfig) -> Self {
        ConfiguredAffinity {
            id: config.id.clone(),
            name: config.name.clone(),
            damageable: config.damageable,
            healable: config.healable,
            save_from_death_at: config.save_from_death_at,
        }
    }

    /// Reject all damage of this affinity
    pub fn immune(mut self) -> Self {
        self.damageable = false;
        self
    }

    /// Reject all healing of this affinity
    pub fn unhealable(mut self) -> Self {
        self.healable = false;
        self
    }

    /// Survive lethal blows of this affinity with the given health
    pub fn with_death_save(mut self, health: Health) -> Self {
        self.save_from_death_at = Some(health);
        self
    }
}

impl AffinityType for ConfiguredAffinity {
    fn id(&self) -> AffinityId {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn can_be_damaged(&self, _target: &AliveEntity, _context: &DamageContext) -> OperationResult {
        if self.damageable {
            entity::permitted()
        } else {
            entity::not_allowed()
        }
    }

    fn can_be_healed(&self, _target: &AliveEntity, _context: &HealContext) -> OperationResult {
        if self.healable {
            entity::permitted()
        } else {
            entity::not_allowed()
        }
    }

    fn can_save_from_death(&self, _target: &AliveEntity, _context: &DamageContext) -> DeathSaveContext {
        match self.save_from_death_at {
            Some(health) => DeathSaveContext::save_at(health),
            None => DeathSaveContext::none(),
        }
    }

    fn on_death(
        &self,
        target: &mut AliveEntity,
        context: &DamageContext,
        result: &OperationResult<Health>,
    ) {
        tracing::info!(
            entity = %target.id(),
            source = ?context.source,
            affinity = %self.id,
            health_lost = result.data,
            "{} died to {} damage",
            target.id(),
            self.name
        );
    }

    fn on_saved_from_death(
        &self,
        target: &mut AliveEntity,
        _damage_context: &DamageContext,
        _save_context: &DeathSaveContext,
        result: &OperationResult<Health>,
    ) {
        tracing::info!(
            entity = %target.id(),
            affinity = %self.id,
            health = result.data,
            "{} survived a lethal {} blow",
            target.id(),
            self.name
        );
    }
}
