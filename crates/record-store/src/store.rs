use async_trait::async_trait;

use crate::{EnrollmentRecord, Result};

/// Core trait for enrollment record persistence backends.
///
/// A backend stores the whole collection as one document: `load` returns
/// every record in insertion order and `save` replaces the collection.
/// Backends do no locking of their own; wrap them in a
/// [`RecordRepository`](crate::RecordRepository) to serialize writers.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads all records. Missing storage reads as an empty collection and is
    /// never created here.
    async fn load(&self) -> Result<Vec<EnrollmentRecord>>;

    /// Overwrites the stored collection with `records`.
    async fn save(&self, records: &[EnrollmentRecord]) -> Result<()>;

    /// Creates empty storage if none exists yet. Returns true if it was created.
    async fn initialize(&self) -> Result<bool> {
        Ok(false)
    }
}
