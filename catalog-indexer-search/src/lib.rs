//! # Catalog Indexer Search
//!
//! This crate provides traits and implementations for writing to the search
//! index. It includes definitions for errors, interfaces, and a concrete
//! implementation for OpenSearch built around idempotent bulk upserts.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::OpenSearchProvider;
pub use types::BulkUpsertRequest;
