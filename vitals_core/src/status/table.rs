//! StatusTable - per-entity stacking and removal rules
//!
//! The table only decides and mutates. Which hook to dispatch is reported
//! back through [`StatusTransition`] so the owning entity can fire it.

use super::{AppliedStatus, StatusDefinition};
use crate::operation::{status, OperationResult};
use crate::types::{StackCount, StatusFlags};
use std::sync::Arc;

/// Hook a transition asks the owner to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    Applied,
    StackChanged,
    Removed,
    ApplicationFailed,
    RemovalFailed,
}

/// Outcome of an apply/remove request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusTransition {
    pub event: StatusEvent,
    /// Stack count handed to the hook context (signed delta for stack changes)
    pub context_stacks: StackCount,
    pub result: OperationResult<StackCount>,
}

impl StatusTransition {
    fn new(event: StatusEvent, context_stacks: StackCount, result: OperationResult<StackCount>) -> Self {
        StatusTransition {
            event,
            context_stacks,
            result,
        }
    }
}

/// Ordered collection of applied statuses, one entry per status
#[derive(Debug, Clone, Default)]
pub struct StatusTable {
    entries: Vec<AppliedStatus>,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, status: &Arc<dyn StatusDefinition>) -> Option<usize> {
        self.entries.iter().position(|entry| entry.is(status))
    }

    /// Stack count of a status, 0 when absent
    pub fn stack_count(&self, status: &Arc<dyn StatusDefinition>) -> StackCount {
        self.position(status)
            .map(|index| self.entries[index].stack_count)
            .unwrap_or(0)
    }

    pub fn has(&self, status: &Arc<dyn StatusDefinition>) -> bool {
        self.stack_count(status) > 0
    }

    /// Mutable entry of a status, found by identity
    pub fn entry_mut(&mut self, status: &Arc<dyn StatusDefinition>) -> Option<&mut AppliedStatus> {
        self.entries.iter_mut().find(|entry| entry.is(status))
    }

    /// Applied statuses in insertion order
    pub fn entries(&self) -> &[AppliedStatus] {
        &self.entries
    }

    /// Copy of the entries for dispatch passes that may mutate the table
    pub fn snapshot(&self) -> Vec<AppliedStatus> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replace every entry, used when loading saved state
    pub fn replace(&mut self, entries: Vec<AppliedStatus>) {
        self.entries = entries;
    }

    /// Apply `requested` stacks of `status`
    ///
    /// `permission` is the result of the status' `can_apply` hook.
    ///
    /// # Panics
    /// Panics if `requested` is not greater than zero.
    pub fn apply(
        &mut self,
        status: &Arc<dyn StatusDefinition>,
        requested: StackCount,
        flags: StatusFlags,
        permission: OperationResult,
    ) -> StatusTransition {
        assert!(requested > 0, "Stack count to apply must be greater than zero");

        let max_stack = status.max_stack();
        let index = self.position(status);

        if permission.is_error() && !flags.contains(StatusFlags::IGNORE_CONDITIONS) {
            let current = index.map(|i| self.entries[i].stack_count).unwrap_or(0);
            return StatusTransition::new(
                StatusEvent::ApplicationFailed,
                requested,
                permission.with_data(current),
            );
        }

        let Some(index) = index else {
            let stack_count = if max_stack > 0 {
                requested.min(max_stack)
            } else {
                requested
            };
            self.entries
                .push(AppliedStatus::new(Arc::clone(status), stack_count));
            return StatusTransition::new(StatusEvent::Applied, stack_count, status::applied(stack_count));
        };

        let current = self.entries[index].stack_count;
        if max_stack > 0 && current >= max_stack && !flags.contains(StatusFlags::IGNORE_STACK_LIMIT) {
            return StatusTransition::new(
                StatusEvent::ApplicationFailed,
                requested,
                status::max_stack_reached(current),
            );
        }

        // Stacks never go past a positive max, even when the limit check is skipped
        let stack_change = if max_stack > 0 {
            requested.min(max_stack - current).max(0)
        } else {
            requested
        };
        let new_total = current.saturating_add(stack_change);
        self.entries[index].stack_count = new_total;

        StatusTransition::new(
            StatusEvent::StackChanged,
            stack_change,
            status::stack_changed(new_total),
        )
    }

    /// Remove `requested` stacks of `status`
    ///
    /// `permission` is the result of the status' `can_remove` hook and is
    /// ignored when the status is not applied.
    ///
    /// # Panics
    /// Panics if `requested` is not greater than zero.
    pub fn remove(
        &mut self,
        status: &Arc<dyn StatusDefinition>,
        requested: StackCount,
        flags: StatusFlags,
        permission: OperationResult,
    ) -> StatusTransition {
        assert!(requested > 0, "Stack count to remove must be greater than zero");

        let Some(index) = self.position(status) else {
            return StatusTransition::new(StatusEvent::RemovalFailed, requested, status::not_applied());
        };

        let current = self.entries[index].stack_count;
        if permission.is_error() && !flags.contains(StatusFlags::IGNORE_CONDITIONS) {
            return StatusTransition::new(
                StatusEvent::RemovalFailed,
                requested,
                permission.with_data(current),
            );
        }

        if current < requested && !flags.contains(StatusFlags::IGNORE_STACK_LIMIT) {
            return StatusTransition::new(
                StatusEvent::RemovalFailed,
                requested,
                status::not_enough_stacks(current),
            );
        }

        let stack_change = requested.min(current);
        let new_total = current - stack_change;

        if new_total == 0 {
            self.entries.remove(index);
            return StatusTransition::new(StatusEvent::Removed, 0, status::removed());
        }

        self.entries[index].stack_count = new_total;
        StatusTransition::new(
            StatusEvent::StackChanged,
            -stack_change,
            status::stack_changed(new_total),
        )
    }
}
