//! Orchestrator: drives sync cycles and advances the checkpoint.
//!
//! The unit of consistency is one full cycle, not one batch. The checkpoint
//! only advances after every sync job of the cycle has completed, so a
//! fatal failure mid-cycle leaves the whole window to be re-scanned; safe,
//! because every load is an idempotent full-document upsert.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::sleep;
use tracing::{debug, error, info, instrument};

use catalog_indexer_repository::{
    decode_timestamp, encode_timestamp, CheckpointStore, JoinRelation, FILMWORK_TO_GENRE,
    FILMWORK_TO_PERSON, GENRE_TO_FILMWORK, LAST_UPDATE_KEY, PERSON_TO_FILMWORK,
};
use catalog_indexer_shared::{Backoff, ChangeWindow, DocumentKind, EntityKind};

use crate::detector::ChangeDetector;
use crate::errors::SyncError;
use crate::loader::BulkLoader;
use crate::propagator::Propagator;
use crate::transformer::Transformer;

/// One detector→propagator→transformer→loader chain of a cycle.
#[derive(Debug, Clone, Copy)]
pub struct SyncJob {
    /// Entity kind whose `modified` timestamps are scanned.
    pub source: EntityKind,
    /// Join relation to the root kind; `None` when the source already is
    /// the root kind.
    pub relation: Option<&'static JoinRelation>,
    /// Document kind (and index) refreshed by this job.
    pub target: DocumentKind,
}

/// The fixed job list of one cycle.
///
/// Jobs 1-3 maintain the movie index in person/genre/filmwork order; the
/// remaining jobs maintain the genre and person indexes, each refreshed
/// both for direct changes and for changes to the filmworks they embed.
pub fn sync_jobs() -> [SyncJob; 7] {
    [
        SyncJob {
            source: EntityKind::Person,
            relation: Some(&PERSON_TO_FILMWORK),
            target: DocumentKind::Movie,
        },
        SyncJob {
            source: EntityKind::Genre,
            relation: Some(&GENRE_TO_FILMWORK),
            target: DocumentKind::Movie,
        },
        SyncJob {
            source: EntityKind::Filmwork,
            relation: None,
            target: DocumentKind::Movie,
        },
        SyncJob {
            source: EntityKind::Genre,
            relation: None,
            target: DocumentKind::Genre,
        },
        SyncJob {
            source: EntityKind::Filmwork,
            relation: Some(&FILMWORK_TO_GENRE),
            target: DocumentKind::Genre,
        },
        SyncJob {
            source: EntityKind::Person,
            relation: None,
            target: DocumentKind::Person,
        },
        SyncJob {
            source: EntityKind::Filmwork,
            relation: Some(&FILMWORK_TO_PERSON),
            target: DocumentKind::Person,
        },
    ]
}

/// Outcome of one completed cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleSummary {
    /// The cycle's captured start time, also the new checkpoint value.
    pub started_at: DateTime<Utc>,
    /// Documents indexed across all jobs.
    pub documents_indexed: u64,
}

/// Orchestrator that coordinates the sync pipeline components.
pub struct SyncOrchestrator {
    detector: ChangeDetector,
    propagator: Propagator,
    transformer: Transformer,
    loader: BulkLoader,
    checkpoint: Arc<dyn CheckpointStore>,
    cycle_interval: Duration,
    backoff: Backoff,
}

impl SyncOrchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        detector: ChangeDetector,
        propagator: Propagator,
        transformer: Transformer,
        loader: BulkLoader,
        checkpoint: Arc<dyn CheckpointStore>,
        cycle_interval: Duration,
    ) -> Self {
        Self {
            detector,
            propagator,
            transformer,
            loader,
            checkpoint,
            cycle_interval,
            backoff: Backoff::default(),
        }
    }

    /// Run sync cycles forever.
    ///
    /// Each cycle runs under the retry policy classified on database
    /// connectivity: a transient failure abandons the cycle (checkpoint
    /// untouched) and re-runs the same window after a backoff sleep. Fatal
    /// errors propagate to the caller and terminate the process. Shutdown
    /// is only observed between cycles; no operation is cancelled
    /// mid-flight.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<(), SyncError> {
        info!("Starting catalog sync orchestrator");

        loop {
            let summary = self
                .backoff
                .run("sync cycle", || async { self.run_cycle().await })
                .await
                .inspect_err(|e| error!(error = %e, "Sync cycle failed fatally"))?;

            info!(
                documents_indexed = summary.documents_indexed,
                "Sync cycle complete"
            );

            tokio::select! {
                _ = sleep(self.cycle_interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    return Ok(());
                }
            }
        }
    }

    /// Execute one full synchronization pass over all sync jobs.
    ///
    /// The change window is `[checkpoint, now)`; a missing checkpoint opens
    /// the window at the minimum representable timestamp, which makes the
    /// first cycle a full reindex. The checkpoint is written only after
    /// every job succeeds.
    pub async fn run_cycle(&self) -> Result<CycleSummary, SyncError> {
        let since = match self.checkpoint.get(LAST_UPDATE_KEY).await? {
            Some(raw) => decode_timestamp(&raw)?,
            None => DateTime::<Utc>::MIN_UTC,
        };

        let started_at = Utc::now();
        let window = ChangeWindow::new(since, started_at);

        info!(since = %since, until = %started_at, "Starting sync cycle");

        let mut documents_indexed = 0u64;
        for job in sync_jobs() {
            documents_indexed += self.run_job(&job, window).await?;
        }

        self.checkpoint
            .set(LAST_UPDATE_KEY, &encode_timestamp(started_at))
            .await?;

        Ok(CycleSummary {
            started_at,
            documents_indexed,
        })
    }

    /// Run one sync job, streaming batch at a time: at most one batch is
    /// detected, resolved, transformed and loaded before the next is
    /// fetched.
    async fn run_job(&self, job: &SyncJob, window: ChangeWindow) -> Result<u64, SyncError> {
        debug!(
            source = job.source.as_str(),
            index = job.target.index_name(),
            "Running sync job"
        );

        let mut indexed = 0u64;
        let mut scanner = self.detector.scan(job.source, window);

        while let Some(changed) = scanner.next_batch().await? {
            let roots = self.propagator.resolve_roots(job.relation, &changed).await?;
            if roots.is_empty() {
                continue;
            }

            let documents = self.transformer.build_documents(job.target, &roots).await?;
            indexed += self.loader.load(job.target, &documents).await? as u64;
        }

        Ok(indexed)
    }
}
