//! Single-writer access to a record store.

use tokio::sync::{Mutex, MutexGuard};

use crate::{EnrollmentRecord, RecordStore, RecordStoreError, Reference, Result};

/// Serializes read-modify-write cycles over a [`RecordStore`].
///
/// Every mutation goes through a [`RecordBatch`], which holds the writer
/// lock from the moment the records are loaded until they are committed or
/// dropped. Two concurrent requests therefore cannot overwrite each other's
/// changes.
pub struct RecordRepository<S: RecordStore> {
    store: S,
    writer: Mutex<()>,
}

impl<S: RecordStore> RecordRepository<S> {
    /// Creates a repository over the given backend.
    pub fn new(store: S) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    /// Returns a reference to the underlying backend.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates empty backing storage if it does not exist yet.
    ///
    /// Runs under the writer lock so it cannot clobber a concurrent commit.
    pub async fn initialize(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        if self.store.initialize().await? {
            tracing::info!("record storage initialized");
        }
        Ok(())
    }

    /// Loads all records without taking the writer lock. Never writes.
    pub async fn load(&self) -> Result<Vec<EnrollmentRecord>> {
        self.store.load().await
    }

    /// Acquires the writer lock and loads the current records.
    pub async fn begin(&self) -> Result<RecordBatch<'_, S>> {
        let guard = self.writer.lock().await;
        let records = self.store.load().await?;
        Ok(RecordBatch {
            _guard: guard,
            store: &self.store,
            records,
        })
    }

    /// Appends a single record and persists the collection.
    ///
    /// Fails with [`RecordStoreError::DuplicateReference`] if the reference is
    /// already stored; the check and the write happen under the same lock.
    pub async fn append(&self, record: EnrollmentRecord) -> Result<()> {
        let mut batch = self.begin().await?;
        if batch.contains(&record.reference) {
            return Err(RecordStoreError::DuplicateReference(record.reference));
        }
        batch.push(record);
        batch.commit().await
    }
}

/// A locked, in-memory working copy of the record collection.
///
/// Changes are persisted only by [`RecordBatch::commit`]; dropping the batch
/// discards them and releases the lock.
pub struct RecordBatch<'a, S: RecordStore> {
    _guard: MutexGuard<'a, ()>,
    store: &'a S,
    records: Vec<EnrollmentRecord>,
}

impl<S: RecordStore> RecordBatch<'_, S> {
    /// Returns true if a record with `reference` exists.
    pub fn contains(&self, reference: &Reference) -> bool {
        self.records.iter().any(|r| &r.reference == reference)
    }

    /// Finds the first record with `reference`.
    pub fn find_mut(&mut self, reference: &Reference) -> Option<&mut EnrollmentRecord> {
        self.records.iter_mut().find(|r| &r.reference == reference)
    }

    /// Appends a record to the end of the collection.
    pub fn push(&mut self, record: EnrollmentRecord) {
        self.records.push(record);
    }

    /// Persists the working copy and releases the lock.
    pub async fn commit(self) -> Result<()> {
        self.store.save(&self.records).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::InMemoryRecordStore;
    use domain::{ContactNumber, EnrollmentStatus, ValidatedEnrollment};

    fn record(reference: &str) -> EnrollmentRecord {
        EnrollmentRecord::pending(
            Reference::new(reference),
            ValidatedEnrollment {
                name: "Ana".to_string(),
                contact: ContactNumber::new("5511999999999"),
                course: "EEB".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_append_preserves_order() {
        let repo = RecordRepository::new(InMemoryRecordStore::new());
        repo.append(record("a")).await.unwrap();
        repo.append(record("b")).await.unwrap();

        let refs: Vec<String> = repo
            .load()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.reference.to_string())
            .collect();
        assert_eq!(refs, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_append_rejects_duplicate_reference() {
        let store = InMemoryRecordStore::with_records(vec![record("a")]);
        let repo = RecordRepository::new(store.clone());

        let result = repo.append(record("a")).await;

        assert!(matches!(
            result,
            Err(RecordStoreError::DuplicateReference(r)) if r.as_str() == "a"
        ));
        assert_eq!(store.records().await.len(), 1);
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_batch_find_and_commit() {
        let store = InMemoryRecordStore::with_records(vec![record("a"), record("b")]);
        let repo = RecordRepository::new(store.clone());

        let mut batch = repo.begin().await.unwrap();
        assert!(batch.contains(&Reference::new("b")));
        batch
            .find_mut(&Reference::new("b"))
            .unwrap()
            .complete()
            .unwrap();
        batch.commit().await.unwrap();

        let records = store.records().await;
        assert_eq!(records[0].status, EnrollmentStatus::Pending);
        assert_eq!(records[1].status, EnrollmentStatus::Completed);
    }

    #[tokio::test]
    async fn test_dropped_batch_discards_changes() {
        let store = InMemoryRecordStore::with_records(vec![record("a")]);
        let repo = RecordRepository::new(store.clone());

        {
            let mut batch = repo.begin().await.unwrap();
            batch.push(record("b"));
        }

        assert_eq!(store.records().await.len(), 1);
        assert_eq!(store.save_count().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let store = InMemoryRecordStore::new();
        let repo = Arc::new(RecordRepository::new(store.clone()));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.append(record(&format!("ref-{i}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        assert_eq!(store.records().await.len(), 20);
    }
}
