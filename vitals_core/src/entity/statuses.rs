//! Status protocol: apply, remove, lookups, ticking and persistence

use super::AliveEntity;
use crate::catalog::CatalogKey;
use crate::context::StatusContext;
use crate::error::{Result, VitalsError};
use crate::operation::{status, OperationResult};
use crate::persistence;
use crate::status::{AppliedStatus, StatusDefinition, StatusEvent, StatusTransition};
use crate::types::{ActionSource, StackCount, StatusFlags, StatusId};
use std::sync::Arc;
use tracing::{debug, trace, warn};

impl AliveEntity {
    /// Apply `stack_count` stacks of a catalog status
    ///
    /// # Panics
    /// Panics if `stack_count` is not greater than zero.
    pub fn apply_status(
        &mut self,
        status: &Arc<dyn StatusDefinition>,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        assert!(stack_count > 0, "Stack count to apply must be greater than zero");

        let permission = {
            let context = StatusContext::new(self, Arc::clone(status), stack_count);
            status.can_apply(&context)
        };
        let transition = self.statuses.apply(status, stack_count, flags, permission);
        self.finish_status_transition(status, transition, action_source)
    }

    /// Remove `stack_count` stacks of a status
    ///
    /// # Panics
    /// Panics if `stack_count` is not greater than zero.
    pub fn remove_status(
        &mut self,
        status: &Arc<dyn StatusDefinition>,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        assert!(stack_count > 0, "Stack count to remove must be greater than zero");

        let permission = if self.statuses.has(status) {
            let context = StatusContext::new(self, Arc::clone(status), stack_count);
            status.can_remove(&context)
        } else {
            status::permitted()
        };
        let transition = self.statuses.remove(status, stack_count, flags, permission);
        self.finish_status_transition(status, transition, action_source)
    }

    /// Apply a status resolved from the catalog, `INVALID_STATUS` when unknown
    pub fn apply_status_by_id(
        &mut self,
        id: &StatusId,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        match self.catalog.status(id) {
            Some(status) => self.apply_status(&status, stack_count, flags, action_source),
            None => {
                debug!(entity = %self.id, status = %id, "apply of unknown status");
                status::invalid_status()
            }
        }
    }

    /// Remove a status resolved from the catalog, `INVALID_STATUS` when unknown
    pub fn remove_status_by_id(
        &mut self,
        id: &StatusId,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        match self.catalog.status(id) {
            Some(status) => self.remove_status(&status, stack_count, flags, action_source),
            None => {
                debug!(entity = %self.id, status = %id, "removal of unknown status");
                status::invalid_status()
            }
        }
    }

    pub fn apply_status_typed<S: CatalogKey>(
        &mut self,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        self.apply_status_by_id(&StatusId::from(S::ID), stack_count, flags, action_source)
    }

    pub fn remove_status_typed<S: CatalogKey>(
        &mut self,
        stack_count: StackCount,
        flags: StatusFlags,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        self.remove_status_by_id(&StatusId::from(S::ID), stack_count, flags, action_source)
    }

    pub fn has_status(&self, status: &Arc<dyn StatusDefinition>) -> bool {
        self.statuses.has(status)
    }

    pub fn has_status_by_id(&self, id: &StatusId) -> bool {
        self.status_stack_count_by_id(id) > 0
    }

    pub fn has_status_typed<S: CatalogKey>(&self) -> bool {
        self.has_status_by_id(&StatusId::from(S::ID))
    }

    /// Stack count of a status, 0 when not applied
    pub fn status_stack_count(&self, status: &Arc<dyn StatusDefinition>) -> StackCount {
        self.statuses.stack_count(status)
    }

    /// Stack count of the catalog status with this id, 0 when unknown or absent
    pub fn status_stack_count_by_id(&self, id: &StatusId) -> StackCount {
        self.catalog
            .status(id)
            .map(|status| self.statuses.stack_count(&status))
            .unwrap_or(0)
    }

    pub fn status_stack_count_typed<S: CatalogKey>(&self) -> StackCount {
        self.status_stack_count_by_id(&StatusId::from(S::ID))
    }

    /// Applied statuses in application order
    pub fn applied_statuses(&self) -> &[AppliedStatus] {
        self.statuses.entries()
    }

    /// Run one tick pass over every applied status
    ///
    /// The pass works on a snapshot: statuses applied or removed by tick hooks
    /// are seen on the next pass. Each status' damage carry is written back to
    /// its entry when the entry survived the hook.
    pub fn tick_statuses(&mut self, delta_time: f32) {
        let snapshot = self.statuses.snapshot();
        trace!(entity = %self.id, statuses = snapshot.len(), delta_time, "status tick");

        for applied in snapshot {
            let definition = Arc::clone(&applied.status);
            let carry = {
                let mut context = StatusContext::new(self, applied.status, applied.stack_count);
                context.damage_carry = applied.damage_carry;
                definition.on_status_tick(&mut context, delta_time);
                context.damage_carry
            };
            if let Some(entry) = self.statuses.entry_mut(&definition) {
                entry.damage_carry = carry;
            }
        }
    }

    /// Serialize applied statuses to JSON
    pub fn save_statuses(&self) -> Result<Vec<u8>> {
        persistence::save(self.statuses.entries())
    }

    /// Replace applied statuses with saved ones, resolved through the catalog
    ///
    /// Nothing changes when any saved entry is rejected. No hooks fire.
    pub fn load_statuses(&mut self, bytes: &[u8]) -> Result<()> {
        let saved = persistence::load(bytes)?;
        let mut restored: Vec<AppliedStatus> = Vec::with_capacity(saved.len());

        for entry in saved {
            let Some(status) = self.catalog.status(&entry.id) else {
                warn!(entity = %self.id, status = %entry.id, "saved status is not in the catalog");
                return Err(VitalsError::UnknownStatus(entry.id));
            };

            let max_stack = status.max_stack();
            let over_limit = max_stack > 0 && entry.stack_count > max_stack;
            let duplicate = restored.iter().any(|r| r.is(&status));
            if entry.stack_count <= 0 || over_limit || duplicate {
                warn!(
                    entity = %self.id,
                    status = %entry.id,
                    stack_count = entry.stack_count,
                    "rejected saved status"
                );
                return Err(VitalsError::InvalidSavedStatus {
                    id: entry.id,
                    stack_count: entry.stack_count,
                });
            }

            restored.push(AppliedStatus::new(status, entry.stack_count));
        }

        debug!(entity = %self.id, statuses = restored.len(), "statuses loaded");
        self.statuses.replace(restored);
        Ok(())
    }

    fn finish_status_transition(
        &mut self,
        status: &Arc<dyn StatusDefinition>,
        transition: StatusTransition,
        action_source: ActionSource,
    ) -> OperationResult<StackCount> {
        debug!(
            entity = %self.id,
            status = %status.id(),
            event = ?transition.event,
            code = transition.result.code,
            stacks = transition.result.data,
            "status transition"
        );

        if action_source.is_external() {
            let result = transition.result;
            let mut context = StatusContext::new(self, Arc::clone(status), transition.context_stacks);
            match transition.event {
                StatusEvent::Applied => status.on_status_applied(&mut context, &result),
                StatusEvent::StackChanged => status.on_status_stack_changed(&mut context, &result),
                StatusEvent::Removed => status.on_status_removed(&mut context, &result),
                StatusEvent::ApplicationFailed => status.on_status_application_failed(&mut context, &result),
                StatusEvent::RemovalFailed => status.on_status_removal_failed(&mut context, &result),
            }
        }

        transition.result
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::entity::AliveEntity;
    use crate::error::VitalsError;
    use crate::operation::status;
    use crate::catalog::CatalogKey;
    use crate::presets::BurningStatus;
    use crate::status::StatusDefinition;
    use crate::types::{ActionSource, StatusFlags, StatusId};
    use std::sync::Arc;

    fn make_entity() -> AliveEntity {
        AliveEntity::new("troll", 500, Arc::new(Catalog::with_presets()))
    }

    #[test]
    fn test_apply_typed_and_lookups() {
        let mut troll = make_entity();
        let result = troll.apply_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::External);
        assert!(result.is_similar(&status::applied(0)));

        assert!(troll.has_status_typed::<BurningStatus>());
        assert_eq!(troll.status_stack_count_typed::<BurningStatus>(), 2);
        assert_eq!(troll.applied_statuses().len(), 1);
    }

    #[test]
    fn test_unknown_status_id_is_invalid() {
        let mut troll = make_entity();
        let id = StatusId::from("petrified");

        let result = troll.apply_status_by_id(&id, 1, StatusFlags::empty(), ActionSource::External);
        assert!(result.is_similar(&status::invalid_status()));
        assert!(result.is_error());

        let result = troll.remove_status_by_id(&id, 1, StatusFlags::empty(), ActionSource::External);
        assert!(result.is_similar(&status::invalid_status()));
        assert!(!troll.has_status_by_id(&id));
    }

    #[test]
    fn test_id_lookups_resolve_the_catalog_instance() {
        let mut troll = make_entity();
        // Same id, different instance than the catalog's
        let stray: Arc<dyn StatusDefinition> = Arc::new(BurningStatus);
        troll.apply_status(&stray, 3, StatusFlags::empty(), ActionSource::Internal);

        assert!(troll.has_status(&stray));
        assert_eq!(troll.status_stack_count_typed::<BurningStatus>(), 0);
        assert!(!troll.has_status_by_id(&StatusId::from(BurningStatus::ID)));

        troll.apply_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);
        assert_eq!(troll.status_stack_count_typed::<BurningStatus>(), 1);
        assert_eq!(troll.applied_statuses().len(), 2);
    }

    #[test]
    fn test_tick_carry_survives_between_passes() {
        let mut troll = make_entity();
        troll.apply_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);

        // 4 dps * 0.1s = 0.4 per pass
        troll.tick_statuses(0.1);
        troll.tick_statuses(0.1);
        assert_eq!(troll.current_health(), 500);
        troll.tick_statuses(0.1);
        assert_eq!(troll.current_health(), 499);
        assert!(troll.applied_statuses()[0].damage_carry < 0.25);
    }

    #[test]
    fn test_remove_to_empty() {
        let mut troll = make_entity();
        troll.apply_status_typed::<BurningStatus>(3, StatusFlags::empty(), ActionSource::External);

        let result = troll.remove_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);
        assert!(result.is_similar(&status::stack_changed(0)));
        assert_eq!(result.data, 2);

        let result = troll.remove_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::Internal);
        assert!(result.is_similar(&status::removed()));
        assert!(!troll.has_status_typed::<BurningStatus>());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let mut troll = make_entity();
        troll.apply_status_typed::<BurningStatus>(2, StatusFlags::empty(), ActionSource::Internal);
        let saved = troll.save_statuses().unwrap();

        let mut other = AliveEntity::new("other", 500, Arc::clone(troll.catalog()));
        other.load_statuses(&saved).unwrap();
        assert_eq!(other.status_stack_count_typed::<BurningStatus>(), 2);
    }

    #[test]
    fn test_load_rejects_unknown_status_and_keeps_table() {
        let mut troll = make_entity();
        troll.apply_status_typed::<BurningStatus>(1, StatusFlags::empty(), ActionSource::Internal);

        let bytes = br#"[{"id":"burning","stack_count":2},{"id":"petrified","stack_count":1}]"#;
        let err = troll.load_statuses(bytes).unwrap_err();
        assert!(matches!(err, VitalsError::UnknownStatus(id) if id.as_str() == "petrified"));
        assert_eq!(troll.status_stack_count_typed::<BurningStatus>(), 1);
    }

    #[test]
    fn test_load_rejects_invalid_stack_counts() {
        let mut troll = make_entity();
        let zero = br#"[{"id":"burning","stack_count":0}]"#;
        assert!(matches!(
            troll.load_statuses(zero),
            Err(VitalsError::InvalidSavedStatus { .. })
        ));

        let duplicate = br#"[{"id":"burning","stack_count":1},{"id":"burning","stack_count":1}]"#;
        assert!(troll.load_statuses(duplicate).is_err());
        assert!(troll.applied_statuses().is_empty());
    }

    #[test]
    #[should_panic(expected = "greater than zero")]
    fn test_zero_stack_remove_panics() {
        let mut troll = make_entity();
        let burning = troll.catalog().status_typed::<BurningStatus>().unwrap();
        troll.remove_status(&burning, 0, StatusFlags::empty(), ActionSource::External);
    }
}
