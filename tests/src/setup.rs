//! Test environment setup.

use feed_core::Snapshot;
use std::path::PathBuf;
use std::sync::Arc;
use store_gateway::{MemoryStore, StoreConfig};
use tempfile::TempDir;
use worker::IngestWorker;

pub const COLLECTION: &str = "flights";

/// An isolated pipeline: a temp snapshot path, an in-memory store, and an
/// ingest worker wired between them.
pub struct TestContext {
    // Held for its Drop; the path below lives inside it.
    _dir: TempDir,
    pub snapshot_path: PathBuf,
    pub store: Arc<MemoryStore>,
    pub ingest: Arc<IngestWorker>,
}

impl TestContext {
    pub fn new() -> Self {
        // Short backoff so retry-path tests stay fast.
        Self::with_store_config(StoreConfig {
            chunk_size: 25,
            max_retries: 3,
            retry_backoff_ms: 1,
        })
    }

    pub fn with_store_config(config: StoreConfig) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let snapshot_path = dir.path().join("flights.json");
        let store = Arc::new(MemoryStore::new(config));
        let ingest = Arc::new(IngestWorker::new(
            store.clone(),
            snapshot_path.clone(),
            COLLECTION.to_string(),
        ));
        Self {
            _dir: dir,
            snapshot_path,
            store,
            ingest,
        }
    }

    /// Writes a snapshot to the shared path, replacing any previous one.
    pub fn publish(&self, snapshot: &Snapshot) {
        generator::write_snapshot(&self.snapshot_path, snapshot).expect("Failed to write snapshot");
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
