//! This module defines the `CheckpointStore` trait, the persistence
//! interface for the sync watermark. It abstracts the durable key-value
//! record that lets the indexer resume after restarts.

use crate::errors::CheckpointStoreError;

/// A trait for persisting and retrieving sync checkpoints.
///
/// The store holds a flat key→value record. A backing store that does not
/// exist yet reads as an empty record, not an error. There is exactly one
/// writer (the orchestrator), so implementations need no locking.
#[async_trait::async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Retrieve the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>, CheckpointStoreError>;

    /// Store `value` under `key`, read-modify-writing the whole record and
    /// creating the backing store if missing.
    async fn set(&self, key: &str, value: &str) -> Result<(), CheckpointStoreError>;
}
