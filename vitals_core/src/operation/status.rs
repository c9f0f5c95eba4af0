//! Result constructors for status operations

use super::{OperationResult, ResultDomain};
use crate::types::StackCount;

pub const APPLIED: u16 = 1;
pub const STACK_CHANGED: u16 = 2;
pub const REMOVED: u16 = 3;
pub const INVALID_STATUS: u16 = 10;
pub const NOT_ALLOWED: u16 = 11;
pub const MAX_STACK_REACHED: u16 = 12;
pub const NOT_APPLIED: u16 = 13;
pub const NOT_ENOUGH_STACKS: u16 = 14;

pub fn permitted() -> OperationResult {
    OperationResult::permitted()
}

/// Denial returned by status permission hooks
pub fn not_allowed() -> OperationResult {
    OperationResult::error(ResultDomain::Status, NOT_ALLOWED, ())
}

pub fn invalid_status() -> OperationResult<StackCount> {
    OperationResult::error(ResultDomain::Status, INVALID_STATUS, 0)
}

pub fn applied(stack_count: StackCount) -> OperationResult<StackCount> {
    OperationResult::success(ResultDomain::Status, APPLIED, stack_count)
}

pub fn stack_changed(stack_count: StackCount) -> OperationResult<StackCount> {
    OperationResult::success(ResultDomain::Status, STACK_CHANGED, stack_count)
}

pub fn removed() -> OperationResult<StackCount> {
    OperationResult::success(ResultDomain::Status, REMOVED, 0)
}

pub fn max_stack_reached(stack_count: StackCount) -> OperationResult<StackCount> {
    OperationResult::error(ResultDomain::Status, MAX_STACK_REACHED, stack_count)
}

pub fn not_applied() -> OperationResult<StackCount> {
    OperationResult::error(ResultDomain::Status, NOT_APPLIED, 0)
}

pub fn not_enough_stacks(stack_count: StackCount) -> OperationResult<StackCount> {
    OperationResult::error(ResultDomain::Status, NOT_ENOUGH_STACKS, stack_count)
}
