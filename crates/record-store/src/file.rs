use std::io::{self, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tempfile::NamedTempFile;

use crate::{EnrollmentRecord, RecordStore, Result};

/// Record store backed by a single pretty-printed JSON array on disk.
///
/// Loading never writes: a missing file reads as an empty collection and is
/// created by [`RecordStore::initialize`] or the first save. Each save goes to
/// its own temporary file in the target directory which is then persisted over
/// the target, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileRecordStore {
    path: PathBuf,
}

impl JsonFileRecordStore {
    /// Creates a store persisting to `path`. Nothing is touched until first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn directory(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

fn write_atomically(dir: &Path, path: &Path, body: &[u8]) -> io::Result<()> {
    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(body)?;
    temp.as_file().sync_all()?;
    temp.persist(path)?;
    Ok(())
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<EnrollmentRecord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("record file missing, treating as empty collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let records: Vec<EnrollmentRecord> = serde_json::from_slice(&bytes)?;
        tracing::debug!(count = records.len(), "records loaded");
        Ok(records)
    }

    #[tracing::instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()))]
    async fn save(&self, records: &[EnrollmentRecord]) -> Result<()> {
        let dir = self.directory();
        tokio::fs::create_dir_all(&dir).await?;

        let body = serde_json::to_vec_pretty(records)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &path, &body))
            .await
            .map_err(io::Error::other)??;

        tracing::debug!("records saved");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn initialize(&self) -> Result<bool> {
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(false);
        }
        self.save(&[]).await?;
        tracing::info!("record file missing, initialized empty collection");
        Ok(true)
    }
}
