use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{EnrollmentRecord, RecordStore, RecordStoreError, Result};

#[derive(Debug, Default)]
struct InMemoryState {
    records: Vec<EnrollmentRecord>,
    save_count: usize,
    fail_on_save: bool,
}

/// In-memory record store for testing.
///
/// Cloning shares the underlying collection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    state: Arc<RwLock<InMemoryState>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `records`.
    pub fn with_records(records: Vec<EnrollmentRecord>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryState {
                records,
                ..Default::default()
            })),
        }
    }

    /// Returns a copy of the stored records.
    pub async fn records(&self) -> Vec<EnrollmentRecord> {
        self.state.read().await.records.clone()
    }

    /// Returns how many times `save` has succeeded.
    pub async fn save_count(&self) -> usize {
        self.state.read().await.save_count
    }

    /// Configures subsequent `save` calls to fail with an I/O error.
    pub async fn set_fail_on_save(&self, fail: bool) {
        self.state.write().await.fail_on_save = fail;
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn load(&self) -> Result<Vec<EnrollmentRecord>> {
        Ok(self.state.read().await.records.clone())
    }

    async fn save(&self, records: &[EnrollmentRecord]) -> Result<()> {
        let mut state = self.state.write().await;
        if state.fail_on_save {
            return Err(RecordStoreError::Io(std::io::Error::other(
                "simulated write failure",
            )));
        }
        state.records = records.to_vec();
        state.save_count += 1;
        Ok(())
    }
}
