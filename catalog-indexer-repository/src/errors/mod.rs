//! Error types for the catalog indexer repository.
//! Consolidates and re-exports error types for catalog reads and checkpoint
//! persistence.

mod catalog;
mod checkpoint;

pub use catalog::CatalogRepositoryError;
pub use checkpoint::CheckpointStoreError;
