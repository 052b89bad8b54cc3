//! Wires the producer and consumer schedulers together for a bounded run.

use crate::generate::GeneratorWorker;
use crate::ingest::IngestWorker;
use crate::scheduler::RepeatingScheduler;
use feed_core::{Error, Result};
use generator::FlightSynthesizer;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use store_gateway::StorageGateway;
use telemetry::metrics;
use tracing::info;

/// Run parameters for one bounded feed session.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Shared snapshot document path
    pub snapshot_path: PathBuf,
    /// Destination collection name
    pub collection: String,
    /// Records per generated snapshot
    pub records_per_snapshot: usize,
    /// Producer tick interval
    pub producer_interval: Duration,
    /// Consumer tick interval
    pub consumer_interval: Duration,
    /// Total wall-clock run duration
    pub run_for: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            snapshot_path: PathBuf::from("flights.json"),
            collection: "flights".to_string(),
            records_per_snapshot: 300,
            producer_interval: Duration::from_secs(1),
            consumer_interval: Duration::from_secs(1),
            run_for: Duration::from_secs(3600),
        }
    }
}

/// Owns both schedulers. Both sides tick against the same snapshot path with
/// no cross coordination; the run ends when the duration elapses or when
/// either scheduler dies on a fatal error. Every exit path stops both
/// schedulers (the scheduler's own Drop covers cancellation), so no timer
/// stays armed after shutdown.
pub struct Orchestrator {
    config: RunConfig,
    store: Arc<dyn StorageGateway>,
}

impl Orchestrator {
    pub fn new(config: RunConfig, store: Arc<dyn StorageGateway>) -> Self {
        Self { config, store }
    }

    pub async fn run(&self) -> Result<()> {
        let generator = Arc::new(GeneratorWorker::new(
            FlightSynthesizer::new(self.config.records_per_snapshot),
            self.config.snapshot_path.clone(),
        ));
        let ingest = Arc::new(IngestWorker::new(
            self.store.clone(),
            self.config.snapshot_path.clone(),
            self.config.collection.clone(),
        ));

        let producer = RepeatingScheduler::new(self.config.producer_interval);
        let consumer = RepeatingScheduler::new(self.config.consumer_interval);
        producer.start(generator);
        consumer.start(ingest);

        info!(
            collection = %self.config.collection,
            snapshot = %self.config.snapshot_path.display(),
            run_secs = self.config.run_for.as_secs(),
            "Feed running"
        );

        let outcome = tokio::select! {
            _ = tokio::time::sleep(self.config.run_for) => {
                info!("Run duration elapsed");
                Ok(())
            }
            _ = producer.terminated() => {
                Err(Error::internal("producer scheduler terminated on a fatal error"))
            }
            _ = consumer.terminated() => {
                Err(Error::internal("consumer scheduler terminated on a fatal error"))
            }
        };

        // Let in-flight ticks finish before reporting.
        for handle in [producer.stop(), consumer.stop()].into_iter().flatten() {
            let _ = handle.await;
        }

        let report = metrics().snapshot();
        info!(
            snapshots_generated = report.snapshots_generated,
            records_submitted = report.records_submitted,
            duplicate_idents = report.duplicate_idents,
            write_retries = report.write_retries,
            ticks_skipped = report.ticks_skipped_no_snapshot,
            "Run complete"
        );

        outcome
    }
}
