//! Domain error types.

use common::Reference;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Required enrollment data is missing or blank.
    #[error("Incomplete enrollment data: {0}")]
    Validation(String),

    /// The record has already left the pending state.
    #[error("Enrollment {0} is already completed")]
    AlreadyCompleted(Reference),
}
