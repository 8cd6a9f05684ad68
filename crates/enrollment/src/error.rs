//! Enrollment workflow error types.

use domain::DomainError;
use gateways::GatewayError;
use record_store::RecordStoreError;
use thiserror::Error;

/// Errors that can occur during enrollment workflows.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// Invalid input or lifecycle violation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Reading or writing the record store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] RecordStoreError),

    /// An external collaborator failed.
    #[error("Collaborator error: {0}")]
    Gateway(#[from] GatewayError),
}

impl EnrollmentError {
    /// Returns true if the caller sent bad input.
    pub fn is_validation(&self) -> bool {
        matches!(self, EnrollmentError::Domain(DomainError::Validation(_)))
    }
}

/// Convenience type alias for enrollment results.
pub type Result<T> = std::result::Result<T, EnrollmentError>;
