//! AppliedStatus - a status and its stack count on one entity

use super::StatusDefinition;
use crate::types::{StackCount, StatusId};
use std::sync::Arc;

/// Applied status entry
#[derive(Debug, Clone)]
pub struct AppliedStatus {
    pub status: Arc<dyn StatusDefinition>,
    /// Always greater than zero while stored in a table
    pub stack_count: StackCount,
    /// Fraction of tick damage not yet dealt, in `[0, 1)`
    pub damage_carry: f64,
}

impl AppliedStatus {
    pub fn new(status: Arc<dyn StatusDefinition>, stack_count: StackCount) -> Self {
        AppliedStatus {
            status,
            stack_count,
            damage_carry: 0.0,
        }
    }

    /// Identity comparison with a catalog instance
    pub fn is(&self, status: &Arc<dyn StatusDefinition>) -> bool {
        Arc::ptr_eq(&self.status, status)
    }

    pub fn id(&self) -> StatusId {
        self.status.id()
    }
}
