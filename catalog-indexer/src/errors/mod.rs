//! Error types for the sync pipeline.

use catalog_indexer_repository::{CatalogRepositoryError, CheckpointStoreError};
use catalog_indexer_search::SearchIndexError;
use catalog_indexer_shared::RetryClass;
use thiserror::Error;

/// Errors that can occur while running sync cycles.
#[derive(Error, Debug)]
pub enum SyncError {
    /// Error reading the relational catalog.
    #[error("Repository error: {0}")]
    Repository(#[from] CatalogRepositoryError),

    /// Error reading or writing the checkpoint.
    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] CheckpointStoreError),

    /// Error writing to the search index.
    #[error("Search index error: {0}")]
    SearchIndex(#[from] SearchIndexError),

    /// Error serializing a document.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RetryClass for SyncError {
    /// Cycle-level classification. Transient search errors never reach this
    /// level (the loader retries them in place), so a surfaced search
    /// error is always fatal here.
    fn is_transient(&self) -> bool {
        match self {
            Self::Repository(error) => error.is_transient(),
            Self::Checkpoint(_) | Self::SearchIndex(_) | Self::Serialization(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_database_errors_stay_transient_at_cycle_level() {
        let error = SyncError::Repository(CatalogRepositoryError::Database(sqlx::Error::Io(
            std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset"),
        )));
        assert!(error.is_transient());
    }

    #[test]
    fn test_search_and_checkpoint_errors_are_fatal_at_cycle_level() {
        assert!(!SyncError::SearchIndex(SearchIndexError::connection("refused")).is_transient());
        assert!(!SyncError::Repository(CatalogRepositoryError::Database(
            sqlx::Error::RowNotFound
        ))
        .is_transient());
    }
}
