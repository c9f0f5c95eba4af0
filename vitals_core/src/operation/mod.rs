//! Operation results - tagged outcomes of every mutating call

pub mod entity;
mod result;
pub mod status;

pub use result::{OperationResult, ResultDomain};
