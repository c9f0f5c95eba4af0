//! JSON persistence for applied statuses
//!
//! Only ids and stack counts are stored. Definitions are resolved through
//! the catalog when loading.

use crate::error::Result;
use crate::status::AppliedStatus;
use crate::types::{StackCount, StatusId};
use serde::{Deserialize, Serialize};

/// Serialized form of an applied status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedStatus {
    pub id: StatusId,
    pub stack_count: StackCount,
}

impl From<&AppliedStatus> for SavedStatus {
    fn from(applied: &AppliedStatus) -> Self {
        SavedStatus {
            id: applied.id(),
            stack_count: applied.stack_count,
        }
    }
}

/// Serialize applied statuses, preserving their order
pub fn save(statuses: &[AppliedStatus]) -> Result<Vec<u8>> {
    let saved: Vec<SavedStatus> = statuses.iter().map(SavedStatus::from).collect();
    Ok(serde_json::to_vec(&saved)?)
}

/// Deserialize saved statuses without resolving them
pub fn load(bytes: &[u8]) -> Result<Vec<SavedStatus>> {
    Ok(serde_json::from_slice(bytes)?)
}
