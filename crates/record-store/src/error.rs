use thiserror::Error;

use crate::Reference;

/// Errors that can occur when reading or writing enrollment records.
#[derive(Debug, Error)]
pub enum RecordStoreError {
    /// The backing file could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted document is not a valid record collection.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record with the same reference is already stored.
    #[error("Duplicate reference: {0}")]
    DuplicateReference(Reference),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, RecordStoreError>;
