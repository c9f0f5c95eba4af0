//! Built-in catalog entries
//!
//! Fire and cold affinities with matching resistances, and a burning status
//! that deals fire damage every tick.

use crate::affinity::AffinityType;
use crate::catalog::CatalogKey;
use crate::context::{DamageContext, StatusContext};
use crate::entity::AliveEntity;
use crate::operation::{status, OperationResult};
use crate::resistance::ResistanceDefinition;
use crate::status::StatusDefinition;
use crate::types::{ActionSource, AffinityId, Health, StackCount, StatusId};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, Default)]
pub struct FireAffinity;

impl CatalogKey for FireAffinity {
    const ID: &'static str = "fire";
}

impl AffinityType for FireAffinity {
    fn id(&self) -> AffinityId {
        Self::ID.into()
    }

    fn name(&self) -> &str {
        "Fire"
    }

    fn on_damage_received(
        &self,
        target: &mut AliveEntity,
        context: &DamageContext,
        result: &OperationResult<Health>,
    ) {
        debug!(
            entity = %target.id(),
            amount = result.data,
            resistance = context.resistance,
            "{} takes fire damage",
            target.id()
        );
    }

    fn on_death(&self, target: &mut AliveEntity, _context: &DamageContext, _result: &OperationResult<Health>) {
        info!(entity = %target.id(), "{} burned to death", target.id());
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ColdAffinity;

impl CatalogKey for ColdAffinity {
    const ID: &'static str = "cold";
}

impl AffinityType for ColdAffinity {
    fn id(&self) -> AffinityId {
        Self::ID.into()
    }

    fn name(&self) -> &str {
        "Cold"
    }

    fn on_death(&self, target: &mut AliveEntity, _context: &DamageContext, _result: &OperationResult<Health>) {
        info!(entity = %target.id(), "{} froze to death", target.id());
    }
}

/// Resistance against fire damage
pub fn fire_resistance() -> ResistanceDefinition {
    ResistanceDefinition::new("fire_resistance", "Fire Resistance").for_affinity(FireAffinity::ID)
}

/// Resistance against cold damage
pub fn cold_resistance() -> ResistanceDefinition {
    ResistanceDefinition::new("cold_resistance", "Cold Resistance").for_affinity(ColdAffinity::ID)
}

/// Burning, up to five stacks, each dealing fire damage over time
#[derive(Debug, Clone, Copy, Default)]
pub struct BurningStatus;

impl BurningStatus {
    pub const MAX_STACK: StackCount = 5;
    /// Fire damage per second per stack
    pub const DAMAGE_PER_SECOND: f64 = 4.0;
}

impl CatalogKey for BurningStatus {
    const ID: &'static str = "burning";
}

impl StatusDefinition for BurningStatus {
    fn id(&self) -> StatusId {
        Self::ID.into()
    }

    fn name(&self) -> &str {
        "Burning"
    }

    fn max_stack(&self) -> StackCount {
        Self::MAX_STACK
    }

    fn on_status_applied(&self, context: &mut StatusContext<'_>, result: &OperationResult<StackCount>) {
        info!(entity = %context.entity.id(), stacks = result.data, "{} is burning", context.entity.id());
    }

    fn on_status_application_failed(&self, context: &mut StatusContext<'_>, result: &OperationResult<StackCount>) {
        if result.is_similar(&status::max_stack_reached(0)) {
            info!(
                entity = %context.entity.id(),
                "{} is already burning at max stacks",
                context.entity.id()
            );
        }
    }

    fn on_status_stack_changed(&self, context: &mut StatusContext<'_>, result: &OperationResult<StackCount>) {
        debug!(
            entity = %context.entity.id(),
            change = context.stack_count,
            stacks = result.data,
            "burning stacks changed"
        );
    }

    fn on_status_removed(&self, context: &mut StatusContext<'_>, _result: &OperationResult<StackCount>) {
        info!(entity = %context.entity.id(), "{} is no longer burning", context.entity.id());
    }

    fn on_status_tick(&self, context: &mut StatusContext<'_>, delta_time: f32) {
        let exact = Self::DAMAGE_PER_SECOND * f64::from(delta_time) * f64::from(context.stack_count);
        let amount = context.accrue_damage(exact);
        if amount > 0 && context.entity.is_alive() {
            context
                .entity
                .damage_typed::<FireAffinity>(None, amount, ActionSource::External);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::resistance::{ModifierTarget, StatModifier};
    use crate::types::StatusFlags;
    use std::sync::Arc;

    #[test]
    fn test_burning_ticks_fire_damage() {
        let mut entity = AliveEntity::new("log", 100, Arc::new(Catalog::with_presets()));
        entity.apply_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::External);

        // 4 dps * 2 stacks * 1s
        entity.tick_statuses(1.0);
        assert_eq!(entity.current_health(), 92);
    }

    #[test]
    fn test_burning_at_coarse_steps_is_not_inflated() {
        let mut entity = AliveEntity::new("log", 1000, Arc::new(Catalog::with_presets()));
        entity.apply_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::Internal);

        // 0.8 per tick, 100 ticks: nominal 80
        for _ in 0..100 {
            entity.tick_statuses(0.1);
        }
        let dealt = 1000 - entity.current_health();
        assert!((79..=81).contains(&dealt), "dealt {dealt}");
    }

    #[test]
    fn test_fire_resistance_blocks_burning() {
        // Blaze entity: +100% fire resistance
        let mut blaze = AliveEntity::new("blaze", 100, Arc::new(Catalog::with_presets()));
        blaze.add_modifier(StatModifier::flat(ModifierTarget::resistance("fire_resistance"), 1.0));
        blaze.apply_status_typed::<BurningStatus>(5, StatusFlags::empty(), ActionSource::External);

        blaze.tick_statuses(1.0);
        assert_eq!(blaze.current_health(), 100);
    }

    #[test]
    fn test_preset_resistances_match_affinities() {
        assert!(fire_resistance().is_valid_for(&FireAffinity::ID.into()));
        assert!(!fire_resistance().is_valid_for(&ColdAffinity::ID.into()));
        assert!(cold_resistance().is_valid_for(&ColdAffinity::ID.into()));
    }
}
