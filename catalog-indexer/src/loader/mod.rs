//! Loading: bulk upserts into the search index under the retry policy.

use std::sync::Arc;

use catalog_indexer_search::{BulkUpsertRequest, SearchIndexProvider};
use catalog_indexer_shared::{Backoff, CatalogDocument, DocumentKind};
use tracing::info;

use crate::errors::SyncError;

/// Loader that bulk-upserts document batches into the search engine.
///
/// Each batch becomes one bulk request of full-document overwrites keyed by
/// entity id, so reloading a batch converges to the same index state. The
/// request is wrapped in the retry policy classified on search connectivity
/// errors; everything else propagates to the cycle boundary.
pub struct BulkLoader {
    provider: Arc<dyn SearchIndexProvider>,
    backoff: Backoff,
}

impl BulkLoader {
    /// Create a new loader with the default backoff parameters.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            backoff: Backoff::default(),
        }
    }

    /// Create a new loader with custom backoff parameters.
    pub fn with_backoff(provider: Arc<dyn SearchIndexProvider>, backoff: Backoff) -> Self {
        Self { provider, backoff }
    }

    /// Load a batch of documents into the index for `kind`.
    ///
    /// # Returns
    ///
    /// The number of documents indexed.
    pub async fn load(
        &self,
        kind: DocumentKind,
        documents: &[CatalogDocument],
    ) -> Result<usize, SyncError> {
        if documents.is_empty() {
            return Ok(0);
        }

        let requests = documents
            .iter()
            .map(|document| {
                Ok(BulkUpsertRequest {
                    id: document.id().to_string(),
                    document: serde_json::to_value(document)?,
                })
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        let index = kind.index_name();
        let indexed = self
            .backoff
            .run("bulk upsert", || async {
                self.provider.bulk_upsert(index, &requests).await
            })
            .await?;

        info!(index, indexed, "Bulk indexing completed");
        Ok(indexed)
    }
}
