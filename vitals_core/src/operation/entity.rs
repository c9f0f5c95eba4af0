//! Result constructors for health operations

use super::{OperationResult, ResultDomain};
use crate::types::Health;

pub const DAMAGED: u16 = 1;
pub const HEALED: u16 = 2;
pub const KILLED: u16 = 3;
pub const SAVED_FROM_DEATH: u16 = 4;
pub const NOT_ALLOWED: u16 = 5;

pub fn permitted() -> OperationResult {
    OperationResult::permitted()
}

/// Denial returned by affinity permission hooks
pub fn not_allowed() -> OperationResult {
    OperationResult::error(ResultDomain::Entity, NOT_ALLOWED, ())
}

/// Entity took damage and survived, payload is health lost
pub fn damaged(health_lost: Health) -> OperationResult<Health> {
    OperationResult::success(ResultDomain::Entity, DAMAGED, health_lost)
}

/// Entity was healed, payload is health added
pub fn healed(health_added: Health) -> OperationResult<Health> {
    OperationResult::success(ResultDomain::Entity, HEALED, health_added)
}

/// Entity died, payload is the health it had before the killing blow
pub fn killed(health_lost: Health) -> OperationResult<Health> {
    OperationResult::success(ResultDomain::Entity, KILLED, health_lost)
}

/// Death was intercepted, payload is the health the entity was left with
///
/// Reported as an error so callers never mistake it for a plain kill.
pub fn saved_from_death(health_set: Health) -> OperationResult<Health> {
    OperationResult::error(ResultDomain::Entity, SAVED_FROM_DEATH, health_set)
}
