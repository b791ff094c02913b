//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent precondition violations on directory input.
/// Expected results such as a missing or duplicate contact are outcomes,
/// not errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid argument: {field} must not be empty")]
    InvalidArgument { field: &'static str },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
