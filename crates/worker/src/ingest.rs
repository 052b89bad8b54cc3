//! Consumer-side tick: read the latest snapshot and move it into the store.

use crate::scheduler::TickTask;
use async_trait::async_trait;
use feed_core::{Error, Result};
use generator::read_snapshot;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use store_gateway::{FlightRow, StorageGateway};
use telemetry::metrics;
use tracing::{debug, info, warn};
use validator::Validate;

/// Reads whatever snapshot is live, stamps it, and batch-writes it.
///
/// The snapshot file is shared with the producer with no coordination: a
/// tick may see a stale or torn document, or the same document twice. Both
/// are harmless because the store overwrites on its composite key.
pub struct IngestWorker {
    store: Arc<dyn StorageGateway>,
    snapshot_path: PathBuf,
    collection: String,
    provisioned: AtomicBool,
}

impl IngestWorker {
    pub fn new(store: Arc<dyn StorageGateway>, snapshot_path: PathBuf, collection: String) -> Self {
        Self {
            store,
            snapshot_path,
            collection,
            provisioned: AtomicBool::new(false),
        }
    }

    /// Ingests the current snapshot and returns the number of records
    /// submitted. Submission is not confirmation: the gateway reports no
    /// partial success, so the count is what was handed over, not what is
    /// known durable.
    pub async fn ingest_latest(&self) -> Result<usize> {
        let snapshot = read_snapshot(&self.snapshot_path)?;
        let now = snapshot.now;

        self.ensure_collection().await?;

        let mut rows = Vec::with_capacity(snapshot.len());
        let mut skipped = 0usize;
        for state in snapshot.into_stamped_records() {
            if let Err(e) = state.validate() {
                skipped += 1;
                debug!(hex = %state.hex, error = %e, "Skipping invalid record");
                continue;
            }
            rows.push(FlightRow::try_from(state)?);
        }
        if skipped > 0 {
            metrics().records_skipped_invalid.inc_by(skipped as u64);
            warn!(skipped = skipped, "Dropped invalid records from snapshot");
        }

        let count = rows.len();
        self.store.batch_write(&self.collection, rows).await?;

        metrics().snapshots_ingested.inc();
        metrics().records_submitted.inc_by(count as u64);
        debug!(
            collection = %self.collection,
            count = count,
            now = now,
            "Submitted snapshot records"
        );
        Ok(count)
    }

    /// Exists-check-then-create, once per process. Not transactional; only
    /// one consumer scheduler runs against a collection.
    async fn ensure_collection(&self) -> Result<()> {
        if self.provisioned.load(Ordering::Acquire) {
            return Ok(());
        }

        if !self.store.exists(&self.collection).await? {
            info!(collection = %self.collection, "Collection missing, provisioning");
            self.store.provision(&self.collection).await?;
        }

        self.provisioned.store(true, Ordering::Release);
        Ok(())
    }
}

#[async_trait]
impl TickTask for IngestWorker {
    fn name(&self) -> &'static str {
        "ingest"
    }

    async fn tick(&self) -> Result<()> {
        match self.ingest_latest().await {
            Ok(_) => Ok(()),
            Err(e @ Error::Snapshot { .. }) => {
                metrics().ticks_skipped_no_snapshot.inc();
                Err(e)
            }
            Err(e) => {
                metrics().store_errors.inc();
                Err(e)
            }
        }
    }
}
