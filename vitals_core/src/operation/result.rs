//! OperationResult - success/error tagged with a domain and sub-code

use serde::{Deserialize, Serialize};
use std::fmt;

/// Subsystem an [`OperationResult`] code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultDomain {
    /// Codes shared by every subsystem (plain permission)
    Generic,
    /// Health, damage, healing and death
    Entity,
    /// Status application and removal
    Status,
    /// Game specific codes returned by custom hooks
    User(u16),
}

impl fmt::Display for ResultDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultDomain::Generic => f.write_str("generic"),
            ResultDomain::Entity => f.write_str("entity"),
            ResultDomain::Status => f.write_str("status"),
            ResultDomain::User(id) => write!(f, "user#{}", id),
        }
    }
}

/// Outcome of an operation, optionally carrying a payload
///
/// Callers branch on the kind of outcome with [`OperationResult::is_similar`]
/// against one of the constructors in [`entity`](super::entity) or
/// [`status`](super::status), never on the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationResult<T = ()> {
    pub success: bool,
    pub domain: ResultDomain,
    pub code: u16,
    pub data: T,
}

/// Generic success code
pub const GENERIC_SUCCESS: u16 = 0;

impl OperationResult<()> {
    /// Generic "permitted" success used by permission hooks
    pub fn permitted() -> Self {
        OperationResult::success(ResultDomain::Generic, GENERIC_SUCCESS, ())
    }
}

impl<T> OperationResult<T> {
    pub fn success(domain: ResultDomain, code: u16, data: T) -> Self {
        OperationResult {
            success: true,
            domain,
            code,
            data,
        }
    }

    pub fn error(domain: ResultDomain, code: u16, data: T) -> Self {
        OperationResult {
            success: false,
            domain,
            code,
            data,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_error(&self) -> bool {
        !self.success
    }

    /// Same domain and code, ignoring the payload
    pub fn is_similar<U>(&self, other: &OperationResult<U>) -> bool {
        self.domain == other.domain && self.code == other.code
    }

    /// Replace the payload
    pub fn with_data<U>(self, data: U) -> OperationResult<U> {
        OperationResult {
            success: self.success,
            domain: self.domain,
            code: self.code,
            data,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OperationResult<U> {
        OperationResult {
            success: self.success,
            domain: self.domain,
            code: self.code,
            data: f(self.data),
        }
    }

    /// Drop the payload
    pub fn without_data(self) -> OperationResult<()> {
        self.with_data(())
    }

    pub fn into_data(self) -> T {
        self.data
    }
}

impl<T> fmt::Display for OperationResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.success { "ok" } else { "error" };
        write!(f, "{}:{} ({})", self.domain, self.code, outcome)
    }
}
