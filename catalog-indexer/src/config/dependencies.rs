//! Dependency initialization and wiring for the catalog indexer.

use std::sync::Arc;

use tracing::info;

use catalog_indexer_repository::{
    CatalogRepositoryError, FileCheckpointStore, PostgresCatalogRepository,
};
use catalog_indexer_search::{OpenSearchProvider, SearchIndexProvider};
use catalog_indexer_shared::Backoff;

use crate::config::Settings;
use crate::detector::ChangeDetector;
use crate::loader::BulkLoader;
use crate::orchestrator::SyncOrchestrator;
use crate::propagator::Propagator;
use crate::transformer::Transformer;
use crate::IndexingError;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: SyncOrchestrator,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// Both external connections are established under the retry policy:
    /// PostgreSQL classified on database connectivity errors, OpenSearch on
    /// search connectivity errors. Startup therefore waits out outages of
    /// either backend instead of failing.
    pub async fn new(settings: &Settings) -> Result<Self, IndexingError> {
        let backoff = Backoff::default();

        info!(
            postgres_host = %settings.postgres.host,
            opensearch_url = %settings.search.url,
            state_path = %settings.sync.state_path.display(),
            "Initializing dependencies"
        );

        let database_url = settings.postgres.connection_url();
        let pool = backoff
            .run("postgres connect", || async {
                sqlx::PgPool::connect(&database_url)
                    .await
                    .map_err(CatalogRepositoryError::from)
            })
            .await
            .map_err(|e| {
                IndexingError::config(format!("Failed to connect to PostgreSQL: {}", e))
            })?;

        info!("PostgreSQL connection established");

        let search_provider = OpenSearchProvider::new(&settings.search.url)
            .await
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;
        let search_provider: Arc<dyn SearchIndexProvider> = Arc::new(search_provider);

        // Validate and create missing indexes before the first cycle.
        backoff
            .run("ensure search indexes", || async {
                search_provider.ensure_indexes_exist().await
            })
            .await
            .map_err(|e| IndexingError::config(format!("Failed to ensure indexes exist: {}", e)))?;

        info!("OpenSearch connection established");

        let repository = Arc::new(PostgresCatalogRepository::new(pool));
        let checkpoint = Arc::new(FileCheckpointStore::new(&settings.sync.state_path));

        let detector = ChangeDetector::new(repository.clone(), settings.sync.page_size);
        let propagator = Propagator::new(repository.clone());
        let transformer = Transformer::new(repository);
        let loader = BulkLoader::new(search_provider);

        let orchestrator = SyncOrchestrator::new(
            detector,
            propagator,
            transformer,
            loader,
            checkpoint,
            settings.sync.cycle_interval,
        );

        Ok(Self { orchestrator })
    }
}
