//! Error types for fallible (non-policy) operations
//!
//! Policy denials (a status that cannot be applied, an immune target, ...)
//! are not errors: they are reported through [`OperationResult`](crate::operation::OperationResult).

use crate::config::ConfigError;
use crate::types::{Health, StackCount, StatusId};
use thiserror::Error;

/// Errors raised by the vitals system
#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Amount must be greater than or equal to zero, got {0}")]
    NegativeAmount(Health),
    #[error("Status '{0}' is not registered in the catalog")]
    UnknownStatus(StatusId),
    #[error("Saved status '{id}' has invalid stack count {stack_count}")]
    InvalidSavedStatus { id: StatusId, stack_count: StackCount },
    #[error("Failed to (de)serialize applied statuses: {0}")]
    Persistence(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, VitalsError>;
