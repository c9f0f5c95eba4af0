//! ConfiguredStatus - status defined in TOML

use super::StatusDefinition;
use crate::config::StatusConfig;
use crate::context::StatusContext;
use crate::operation::{status, OperationResult};
use crate::types::{ActionSource, AffinityId, StackCount, StatusId};

/// Data driven status
///
/// Optionally deals damage over time: `damage_per_second` per stack, of
/// `tick_affinity` (untyped when unset).
#[derive(Debug, Clone)]
pub struct ConfiguredStatus {
    id: StatusId,
    name: String,
    max_stack: StackCount,
    removable: bool,
    damage_per_second: f64,
    tick_affinity: Option<AffinityId>,
}

impl ConfiguredStatus {
    pub fn new(id: impl Into<StatusId>, name: impl Into<String>, max_stack: StackCount) -> Self {
        ConfiguredStatus {
            id: id.into(),
            name: name.into(),
            max_stack,
            removable: true,
            damage_per_second: 0.0,
            tick_affinity: None,
        }
    }

    pub fn from_config(config: &StatusConfig) -> Self {
        ConfiguredStatus {
            id: config.id.clone(),
            name: config.name.clone(),
            max_stack: config.max_stack,
            removable: config.removable,
            damage_per_second: config.damage_per_second,
            tick_affinity: config.tick_affinity.clone(),
        }
    }

    /// Deal damage over time while applied
    pub fn with_damage(mut self, damage_per_second: f64, affinity: Option<AffinityId>) -> Self {
        self.damage_per_second = damage_per_second;
        self.tick_affinity = affinity;
        self
    }

    /// Reject removal unless forced with `IGNORE_CONDITIONS`
    pub fn permanent(mut self) -> Self {
        self.removable = false;
        self
    }

    /// Unrounded damage owed for one tick at the given stack count
    pub fn tick_damage(&self, stack_count: StackCount, delta_time: f32) -> f64 {
        (self.damage_per_second * f64::from(delta_time) * f64::from(stack_count)).max(0.0)
    }
}

impl StatusDefinition for ConfiguredStatus {
    fn id(&self) -> StatusId {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn max_stack(&self) -> StackCount {
        self.max_stack
    }

    fn can_remove(&self, _context: &StatusContext<'_>) -> OperationResult {
        if self.removable {
            status::permitted()
        } else {
            status::not_allowed()
        }
    }

    fn on_status_applied(&self, context: &mut StatusContext<'_>, result: &OperationResult<StackCount>) {
        tracing::debug!(
            entity = %context.entity.id(),
            status = %self.id,
            stacks = result.data,
            "status applied"
        );
    }

    fn on_status_removed(&self, context: &mut StatusContext<'_>, _result: &OperationResult<StackCount>) {
        tracing::debug!(entity = %context.entity.id(), status = %self.id, "status removed");
    }

    fn on_status_tick(&self, context: &mut StatusContext<'_>, delta_time: f32) {
        let amount = context.accrue_damage(self.tick_damage(context.stack_count, delta_time));
        if amount <= 0 {
            return;
        }

        let source = None;
        match &self.tick_affinity {
            Some(affinity) => {
                context
                    .entity
                    .damage_with(affinity, source, amount, ActionSource::External);
            }
            None => {
                context
                    .entity
                    .damage_untyped(source, amount, ActionSource::External);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_damage_scales_with_stacks_and_delta() {
        let poison = ConfiguredStatus::new("poison", "Poison", -1).with_damage(10.0, None);
        // 10 dps * 0.5s * 3 stacks
        assert_eq!(poison.tick_damage(3, 0.5), 15.0);
        assert_eq!(poison.tick_damage(0, 0.5), 0.0);
    }

    #[test]
    fn test_non_damaging_status() {
        let slow = ConfiguredStatus::new("slow", "Slow", 1);
        assert_eq!(slow.tick_damage(1, 1.0), 0.0);
        assert_eq!(slow.max_stack(), 1);
    }

    #[test]
    fn test_sub_point_ticks_add_up() {
        use crate::catalog::Catalog;
        use crate::entity::AliveEntity;
        use crate::types::StatusFlags;
        use std::sync::Arc;

        let catalog = Arc::new(
            Catalog::builder()
                .status(ConfiguredStatus::new("poisoned", "Poisoned", -1).with_damage(1.0, None))
                .build(),
        );
        let mut entity = AliveEntity::new("rat", 20, catalog);
        entity.apply_status_by_id(&"poisoned".into(), 1, StatusFlags::empty(), ActionSource::Internal);

        // 1 dps sliced into 0.25s ticks
        for _ in 0..8 {
            entity.tick_statuses(0.25);
        }
        assert_eq!(entity.current_health(), 18);
    }
}
