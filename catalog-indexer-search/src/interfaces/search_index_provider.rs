//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index writes,
//! allowing for different backend implementations (OpenSearch,
//! Elasticsearch, etc.) and for mock providers in tests.

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::BulkUpsertRequest;

/// Abstracts the underlying search index implementation.
///
/// There is no single-document write path: the sync pipeline always writes
/// whole batches, and every write is a full-document upsert keyed by id, so
/// replaying a batch converges to the same index state.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Ensure every managed index exists with its mappings, creating any
    /// that are missing. Called once during application startup.
    async fn ensure_indexes_exist(&self) -> Result<(), SearchIndexError>;

    /// Submit one bulk request upserting every document into `index`.
    ///
    /// The per-item results of the bulk response are inspected: any failed
    /// item makes the whole call fail with a `BulkIndexError` naming the
    /// failed ids. Partial success is never reported as success.
    ///
    /// # Arguments
    ///
    /// * `index` - Target index name.
    /// * `requests` - The documents to upsert.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of documents indexed.
    /// * `Err(SearchIndexError)` - If the request or any item fails.
    async fn bulk_upsert(
        &self,
        index: &str,
        requests: &[BulkUpsertRequest],
    ) -> Result<usize, SearchIndexError>;
}
