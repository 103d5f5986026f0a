//! Catalog Indexer Main Entry Point
//!
//! This is the main binary for the catalog search indexer. It polls
//! PostgreSQL for catalog changes and keeps the OpenSearch indexes
//! consistent, forever, checkpointing after every completed cycle.

use dotenv::dotenv;
use catalog_indexer::{Dependencies, IndexingError, Settings};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("catalog_indexer=info,catalog_indexer_repository=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
        .init();

    info!(
        service_name = "catalog-indexer",
        service_version = env!("CARGO_PKG_VERSION"),
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), IndexingError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing();

    info!("Starting catalog indexer");

    let settings = Settings::from_env()?;

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    // Runs forever; only a fatal (non-retryable) error or a shutdown
    // signal gets us here.
    match deps.orchestrator.run().await {
        Ok(()) => {
            info!("Catalog indexer stopped");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Catalog indexer failed");
            Err(e.into())
        }
    }
}
