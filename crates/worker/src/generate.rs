//! Producer-side tick: synthesize a snapshot and overwrite the shared file.

use crate::scheduler::TickTask;
use async_trait::async_trait;
use feed_core::Result;
use generator::{write_snapshot, FlightSynthesizer};
use std::path::PathBuf;
use telemetry::metrics;
use tracing::debug;

/// Regenerates the shared snapshot on every tick.
pub struct GeneratorWorker {
    synthesizer: FlightSynthesizer,
    snapshot_path: PathBuf,
}

impl GeneratorWorker {
    pub fn new(synthesizer: FlightSynthesizer, snapshot_path: PathBuf) -> Self {
        Self {
            synthesizer,
            snapshot_path,
        }
    }
}

#[async_trait]
impl TickTask for GeneratorWorker {
    fn name(&self) -> &'static str {
        "generator"
    }

    async fn tick(&self) -> Result<()> {
        let snapshot = self.synthesizer.generate();
        let count = snapshot.len();
        let now = snapshot.now;

        if let Err(e) = write_snapshot(&self.snapshot_path, &snapshot) {
            metrics().snapshot_write_errors.inc();
            return Err(e);
        }

        metrics().snapshots_generated.inc();
        metrics().records_generated.inc_by(count as u64);
        debug!(now = now, count = count, "Generated snapshot");
        Ok(())
    }
}
