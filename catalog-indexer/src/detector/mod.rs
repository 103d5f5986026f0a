//! Change detection: paginated scans of `modified` timestamps.

use std::sync::Arc;

use catalog_indexer_repository::CatalogRepository;
use catalog_indexer_shared::{ChangeWindow, EntityKind};
use tracing::debug;
use uuid::Uuid;

use crate::errors::SyncError;

/// Factory for change scans over one entity kind at a time.
#[derive(Clone)]
pub struct ChangeDetector {
    repository: Arc<dyn CatalogRepository>,
    page_size: i64,
}

impl ChangeDetector {
    pub fn new(repository: Arc<dyn CatalogRepository>, page_size: i64) -> Self {
        Self {
            repository,
            page_size,
        }
    }

    /// Start a scan of `kind` over `window`.
    pub fn scan(&self, kind: EntityKind, window: ChangeWindow) -> ChangeScanner {
        ChangeScanner {
            repository: self.repository.clone(),
            kind,
            window,
            page_size: self.page_size,
            offset: 0,
            done: false,
        }
    }
}

/// A lazy, finite, non-restartable sequence of id batches.
///
/// Each `next_batch` call fetches one page ordered ascending by `modified`;
/// the sequence ends when a page comes back empty. Timestamp ties across a
/// page boundary are not specially handled: the window is closed and
/// propagation re-resolves roots broadly, so a row straddling pages is
/// still picked up.
pub struct ChangeScanner {
    repository: Arc<dyn CatalogRepository>,
    kind: EntityKind,
    window: ChangeWindow,
    page_size: i64,
    offset: i64,
    done: bool,
}

impl ChangeScanner {
    /// Fetch the next batch of changed ids, or `None` when the scan is
    /// exhausted.
    pub async fn next_batch(&mut self) -> Result<Option<Vec<Uuid>>, SyncError> {
        if self.done {
            return Ok(None);
        }

        let ids = self
            .repository
            .changed_ids(self.kind, &self.window, self.page_size, self.offset)
            .await?;

        if ids.is_empty() {
            self.done = true;
            return Ok(None);
        }

        debug!(
            kind = self.kind.as_str(),
            offset = self.offset,
            count = ids.len(),
            "Fetched change batch"
        );

        self.offset += self.page_size;
        Ok(Some(ids))
    }
}
