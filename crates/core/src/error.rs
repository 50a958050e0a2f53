//! Domain error model.

use thiserror::Error;

use crate::id::BeerId;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is an expected, caller-facing outcome. Infrastructure failures belong
/// elsewhere (see `taproom_infra::StoreError`).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Request data was malformed or out of range.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The request collides with existing state (e.g. a duplicate name).
    #[error("conflict: {0}")]
    Conflict(String),

    /// A requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// An increment would push the stock above its maximum.
    #[error("cannot add {amount} units: maximum stock exceeded for beer {id}")]
    CapacityExceeded { id: BeerId, amount: i32 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn capacity_exceeded(id: BeerId, amount: i32) -> Self {
        Self::CapacityExceeded { id, amount }
    }
}
