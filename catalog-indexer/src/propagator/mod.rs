//! Propagation: resolving changed ids to the root ids whose documents embed
//! them.

use std::sync::Arc;

use catalog_indexer_repository::{CatalogRepository, JoinRelation};
use tracing::debug;
use uuid::Uuid;

use crate::errors::SyncError;

/// Resolves changed entity ids to affected root ids through a join
/// relation.
#[derive(Clone)]
pub struct Propagator {
    repository: Arc<dyn CatalogRepository>,
}

impl Propagator {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Resolve the root ids affected by a batch of changed ids.
    ///
    /// `None` means the changed kind IS the root kind: the detected ids are
    /// already root ids and pass through untouched. Otherwise one query
    /// resolves the distinct roots referencing the batch, regardless of the
    /// roots' own `modified` timestamps; that is what catches a stale
    /// filmwork whose person changed.
    pub async fn resolve_roots(
        &self,
        relation: Option<&JoinRelation>,
        ids: &[Uuid],
    ) -> Result<Vec<Uuid>, SyncError> {
        let Some(relation) = relation else {
            return Ok(ids.to_vec());
        };

        let roots = self.repository.resolve_roots(relation, ids).await?;
        debug!(
            relation = relation.name,
            changed = ids.len(),
            roots = roots.len(),
            "Resolved roots"
        );
        Ok(roots)
    }
}
