//! JSON-file implementation of the checkpoint store.
//!
//! Persists the [`CheckpointRecord`] as a single JSON file, read-modify-
//! written whole on every `set`, so the indexer can resume after restarts.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use crate::checkpoint::CheckpointRecord;
use crate::errors::CheckpointStoreError;
use crate::interfaces::CheckpointStore;

/// File-backed checkpoint store.
pub struct FileCheckpointStore {
    path: PathBuf,
}

impl FileCheckpointStore {
    /// Creates a new store backed by the file at `path`. The file is not
    /// touched until the first `set`; a missing file reads as an empty
    /// record.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_record(&self) -> Result<CheckpointRecord, CheckpointStoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(error) if error.kind() == ErrorKind::NotFound => {
                Ok(CheckpointRecord::default())
            }
            Err(error) => Err(error.into()),
        }
    }
}

#[async_trait]
impl CheckpointStore for FileCheckpointStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CheckpointStoreError> {
        let record = self.read_record().await?;
        Ok(record.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CheckpointStoreError> {
        let mut record = self.read_record().await?;
        record.set(key, value);

        let bytes = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(&self.path, bytes).await?;

        debug!(path = %self.path.display(), key, "Checkpoint written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checkpoint::LAST_UPDATE_KEY;

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("state.json"));

        assert_eq!(store.get(LAST_UPDATE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_creates_file_and_get_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = FileCheckpointStore::new(&path);

        store.set(LAST_UPDATE_KEY, "17-03-24 21:45:09").await.unwrap();

        assert!(path.exists());
        assert_eq!(
            store.get(LAST_UPDATE_KEY).await.unwrap(),
            Some("17-03-24 21:45:09".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_preserves_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCheckpointStore::new(dir.path().join("state.json"));

        store.set("other", "kept").await.unwrap();
        store.set(LAST_UPDATE_KEY, "17-03-24 21:45:09").await.unwrap();

        assert_eq!(store.get("other").await.unwrap(), Some("kept".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, b"{not json").await.unwrap();

        let store = FileCheckpointStore::new(&path);
        assert!(matches!(
            store.get(LAST_UPDATE_KEY).await,
            Err(CheckpointStoreError::Serialization(_))
        ));
    }
}
