//! Status effects - definitions, applied stacks and the per-entity table

mod applied;
mod configured;
mod table;

pub use applied::AppliedStatus;
pub use configured::ConfiguredStatus;
pub use table::{StatusEvent, StatusTable, StatusTransition};

use crate::context::StatusContext;
use crate::operation::{status, OperationResult};
use crate::types::{StackCount, StatusId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A status effect that can be applied to entities
///
/// Definitions are shared between all entities. Anything tracked per entity
/// (stacks, timers) lives in the entity's [`StatusTable`], never here.
pub trait StatusDefinition: Send + Sync + fmt::Debug {
    /// Unique identifier of this status
    fn id(&self) -> StatusId;

    /// Display name
    fn name(&self) -> &str;

    /// Max stack count
    ///
    /// Zero or negative means unlimited. A max stack of 1 works as an
    /// active/inactive toggle.
    fn max_stack(&self) -> StackCount;

    /// Checks if the status can be applied to the entity
    fn can_apply(&self, _context: &StatusContext<'_>) -> OperationResult {
        status::permitted()
    }

    /// Checks if the status can be removed from the entity
    fn can_remove(&self, _context: &StatusContext<'_>) -> OperationResult {
        status::permitted()
    }

    /// Status was applied for the first time, payload is the stack count
    fn on_status_applied(
        &self,
        _context: &mut StatusContext<'_>,
        _result: &OperationResult<StackCount>,
    ) {
    }

    /// Application was rejected, payload is the current stack count
    fn on_status_application_failed(
        &self,
        _context: &mut StatusContext<'_>,
        _result: &OperationResult<StackCount>,
    ) {
    }

    /// Last stack was removed
    fn on_status_removed(
        &self,
        _context: &mut StatusContext<'_>,
        _result: &OperationResult<StackCount>,
    ) {
    }

    /// Removal was rejected, payload is the current stack count
    fn on_status_removal_failed(
        &self,
        _context: &mut StatusContext<'_>,
        _result: &OperationResult<StackCount>,
    ) {
    }

    /// Stacks were added or removed; context carries the signed change,
    /// payload the new total
    fn on_status_stack_changed(
        &self,
        _context: &mut StatusContext<'_>,
        _result: &OperationResult<StackCount>,
    ) {
    }

    /// Called every tick while the status is active
    fn on_status_tick(&self, _context: &mut StatusContext<'_>, _delta_time: f32) {}
}

/// Status registry, one shared instance per id
#[derive(Debug, Clone, Default)]
pub struct StatusRegistry {
    statuses: HashMap<StatusId, Arc<dyn StatusDefinition>>,
}

impl StatusRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        StatusRegistry {
            statuses: HashMap::new(),
        }
    }

    /// Register a status, replacing any previous one with the same id
    pub fn register(&mut self, status: Arc<dyn StatusDefinition>) {
        self.statuses.insert(status.id(), status);
    }

    /// Get a status by ID
    pub fn get(&self, id: &StatusId) -> Option<Arc<dyn StatusDefinition>> {
        self.statuses.get(id).cloned()
    }

    pub fn contains(&self, id: &StatusId) -> bool {
        self.statuses.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &StatusId> {
        self.statuses.keys()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}
