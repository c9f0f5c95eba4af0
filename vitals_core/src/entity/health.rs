//! Health resolution: damage, healing, kill and death saves

use super::AliveEntity;
use crate::catalog::CatalogKey;
use crate::context::{DamageContext, DeathSaveContext, HealContext};
use crate::operation::{entity, OperationResult};
use crate::types::{ActionSource, AffinityId, EntityId, Health};
use tracing::debug;

impl AliveEntity {
    /// Resolve damage against this entity
    ///
    /// Lethal damage is resolved as a kill with the same action source, and
    /// the kill result is returned in place of the damaged result. An external
    /// call dispatches exactly one reaction hook: `on_damage_received`,
    /// `on_damage_failed`, `on_death` or `on_saved_from_death`.
    pub fn damage(&mut self, context: &DamageContext, action_source: ActionSource) -> OperationResult<Health> {
        let permission = match &context.affinity {
            Some(affinity) => affinity.can_be_damaged(self, context),
            None => entity::permitted(),
        };

        if permission.is_error() {
            debug!(entity = %self.id, code = permission.code, "damage denied");
            if action_source.is_external() {
                if let Some(affinity) = &context.affinity {
                    affinity.on_damage_failed(self, context, &permission);
                }
            }
            return permission.with_data(0);
        }

        let health_to_change = context.amount.min(self.current_health);
        self.current_health -= health_to_change;

        if self.current_health <= 0 {
            return self.kill(context, action_source, Some(health_to_change));
        }

        let result = entity::damaged(health_to_change);
        debug!(
            entity = %self.id,
            amount = health_to_change,
            health = self.current_health,
            "damaged"
        );
        if action_source.is_external() {
            if let Some(affinity) = &context.affinity {
                affinity.on_damage_received(self, context, &result);
            }
        }
        result
    }

    /// Resolve healing on this entity; never triggers death logic
    pub fn heal(&mut self, context: &HealContext, action_source: ActionSource) -> OperationResult<Health> {
        let permission = match &context.affinity {
            Some(affinity) => affinity.can_be_healed(self, context),
            None => entity::permitted(),
        };

        if permission.is_error() {
            debug!(entity = %self.id, code = permission.code, "healing denied");
            if action_source.is_external() {
                if let Some(affinity) = &context.affinity {
                    affinity.on_healing_failed(self, context, &permission);
                }
            }
            return permission.with_data(0);
        }

        let health_to_change = (self.max_health - self.current_health).min(context.amount).max(0);
        self.current_health += health_to_change;

        let result = entity::healed(health_to_change);
        debug!(
            entity = %self.id,
            amount = health_to_change,
            health = self.current_health,
            "healed"
        );
        if action_source.is_external() {
            if let Some(affinity) = &context.affinity {
                affinity.on_healing_received(self, context, &result);
            }
        }
        result
    }

    /// Kill this entity unless the affinity saves it
    ///
    /// `health_before_death` defaults to the current health. A saved entity
    /// is left with the save's health clamped to `[0, max_health]` and the
    /// result is the `SAVED_FROM_DEATH` error.
    pub fn kill(
        &mut self,
        context: &DamageContext,
        action_source: ActionSource,
        health_before_death: Option<Health>,
    ) -> OperationResult<Health> {
        let health_before_death = health_before_death.unwrap_or(self.current_health);
        self.current_health = 0;

        let save = match &context.affinity {
            Some(affinity) => affinity.can_save_from_death(self, context),
            None => DeathSaveContext::none(),
        };

        if save.should_be_saved {
            self.current_health = save.health_to_set.clamp(0, self.max_health);
            let result = entity::saved_from_death(self.current_health);
            debug!(entity = %self.id, health = self.current_health, "saved from death");
            if action_source.is_external() {
                if let Some(affinity) = &context.affinity {
                    affinity.on_saved_from_death(self, context, &save, &result);
                }
            }
            return result;
        }

        let result = entity::killed(health_before_death);
        debug!(entity = %self.id, amount = health_before_death, "killed");
        if action_source.is_external() {
            if let Some(affinity) = &context.affinity {
                affinity.on_death(self, context, &result);
            }
        }
        result
    }

    /// Damage with an affinity resolved from the catalog
    ///
    /// An unknown affinity id deals untyped damage.
    ///
    /// # Panics
    /// Panics if `amount` is negative.
    pub fn damage_with(
        &mut self,
        affinity: &AffinityId,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        let context = self.damage_context(affinity, source, amount);
        self.damage(&context, action_source)
    }

    /// Heal with an affinity resolved from the catalog
    ///
    /// # Panics
    /// Panics if `amount` is negative.
    pub fn heal_with(
        &mut self,
        affinity: &AffinityId,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        let context = self.heal_context(affinity, source, amount);
        self.heal(&context, action_source)
    }

    pub fn damage_typed<A: CatalogKey>(
        &mut self,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        self.damage_with(&AffinityId::from(A::ID), source, amount, action_source)
    }

    pub fn heal_typed<A: CatalogKey>(
        &mut self,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        self.heal_with(&AffinityId::from(A::ID), source, amount, action_source)
    }

    /// Damage without affinity or resistance
    pub fn damage_untyped(
        &mut self,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        let context = DamageContext::untyped(self.id.clone(), source, amount);
        self.damage(&context, action_source)
    }

    /// Healing without affinity or resistance
    pub fn heal_untyped(
        &mut self,
        source: Option<EntityId>,
        amount: Health,
        action_source: ActionSource,
    ) -> OperationResult<Health> {
        let context = HealContext::untyped(self.id.clone(), source, amount);
        self.heal(&context, action_source)
    }

    /// Build a damage context against this entity, resolving affinity and resistance
    pub fn damage_context(&self, affinity: &AffinityId, source: Option<EntityId>, amount: Health) -> DamageContext {
        match self.catalog.affinity(affinity) {
            Some(resolved) => {
                let resistance = self.resistance(affinity);
                DamageContext::new(self.id.clone(), source, Some(resolved), resistance, amount)
            }
            None => {
                debug!(entity = %self.id, affinity = %affinity, "unknown affinity, dealing untyped damage");
                DamageContext::untyped(self.id.clone(), source, amount)
            }
        }
    }

    /// Build a heal context for this entity, resolving affinity and resistance
    pub fn heal_context(&self, affinity: &AffinityId, source: Option<EntityId>, amount: Health) -> HealContext {
        match self.catalog.affinity(affinity) {
            Some(resolved) => {
                let resistance = self.resistance(affinity);
                HealContext::new(self.id.clone(), source, Some(resolved), resistance, amount)
            }
            None => {
                debug!(entity = %self.id, affinity = %affinity, "unknown affinity, healing untyped");
                HealContext::untyped(self.id.clone(), source, amount)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::context::DamageContext;
    use crate::entity::AliveEntity;
    use crate::operation::entity;
    use crate::presets::FireAffinity;
    use crate::resistance::{ModifierTarget, StatModifier};
    use crate::types::ActionSource;
    use std::sync::Arc;

    fn make_entity() -> AliveEntity {
        AliveEntity::new("goblin", 100, Arc::new(Catalog::with_presets()))
    }

    #[test]
    fn test_damage_then_lethal_damage() {
        let mut goblin = make_entity();

        let result = goblin.damage_untyped(None, 30, ActionSource::External);
        assert!(result.is_similar(&entity::damaged(0)));
        assert_eq!(result.data, 30);
        assert_eq!(goblin.current_health(), 70);

        let result = goblin.damage_untyped(None, 80, ActionSource::External);
        assert!(result.is_similar(&entity::killed(0)));
        assert_eq!(result.data, 70);
        assert_eq!(goblin.current_health(), 0);
        assert!(!goblin.is_alive());
    }

    #[test]
    fn test_heal_is_capped_at_max() {
        let mut goblin = make_entity();
        goblin.damage_untyped(None, 10, ActionSource::External);

        let result = goblin.heal_untyped(None, 50, ActionSource::External);
        assert!(result.is_similar(&entity::healed(0)));
        assert_eq!(result.data, 10);
        assert_eq!(goblin.current_health(), 100);
    }

    #[test]
    fn test_resistance_reduces_typed_damage() {
        let mut goblin = make_entity();
        goblin.add_modifier(StatModifier::flat(ModifierTarget::resistance("fire_resistance"), 0.25));

        let result = goblin.damage_typed::<FireAffinity>(None, 100, ActionSource::External);
        assert_eq!(result.data, 75);
        assert_eq!(goblin.current_health(), 25);
    }

    #[test]
    fn test_unknown_affinity_is_untyped() {
        let mut goblin = make_entity();
        let context = goblin.damage_context(&"arcane".into(), None, 40);
        assert!(context.affinity.is_none());

        let result = goblin.damage_with(&"arcane".into(), None, 40, ActionSource::External);
        assert_eq!(result.data, 40);
    }

    #[test]
    fn test_direct_kill_defaults_to_current_health() {
        let mut goblin = make_entity();
        goblin.damage_untyped(None, 15, ActionSource::External);

        let context = DamageContext::untyped(goblin.id().clone(), None, 0);
        let result = goblin.kill(&context, ActionSource::External, None);
        assert!(result.is_success());
        assert_eq!(result.data, 85);
        assert_eq!(goblin.current_health(), 0);
    }

    #[test]
    fn test_damage_on_dead_entity_kills_again() {
        let mut goblin = make_entity();
        goblin.damage_untyped(None, 100, ActionSource::External);

        let result = goblin.damage_untyped(None, 5, ActionSource::External);
        assert!(result.is_similar(&entity::killed(0)));
        assert_eq!(result.data, 0);
    }
}
