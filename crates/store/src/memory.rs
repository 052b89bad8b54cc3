//! In-memory keyed store backend.
//!
//! Rows live in per-collection `BTreeMap`s keyed by (`hex`, `timestamp`), so
//! same-key writes overwrite instead of appending; that overwrite is the only
//! consistency mechanism the pipeline relies on. A throttle plan can be
//! injected to exercise the gateway's retry path under synthetic load.

use crate::batch;
use crate::config::StoreConfig;
use crate::gateway::{FlightRow, StorageGateway};
use async_trait::async_trait;
use feed_core::{Error, Result};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

type Key = (String, i64);

#[derive(Debug, Default)]
struct Collection {
    rows: BTreeMap<Key, FlightRow>,
}

/// In-memory implementation of [`StorageGateway`].
pub struct MemoryStore {
    config: StoreConfig,
    collections: RwLock<HashMap<String, Collection>>,
    /// Chunk writes to reject with a throttle before accepting again.
    throttle_budget: AtomicU32,
}

impl MemoryStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            collections: RwLock::new(HashMap::new()),
            throttle_budget: AtomicU32::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Makes the next `n` chunk writes fail with a throttle error.
    pub fn throttle_next_chunks(&self, n: u32) {
        self.throttle_budget.store(n, Ordering::SeqCst);
    }

    /// Total row count across a collection, for tests and the shutdown report.
    pub fn row_count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |c| c.rows.len())
    }

    fn put_chunk(&self, collection: &str, chunk: &[FlightRow]) -> Result<()> {
        let throttled = self
            .throttle_budget
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if throttled {
            return Err(Error::throttled("write capacity exceeded"));
        }

        let mut collections = self.collections.write();
        let target = collections.get_mut(collection).ok_or_else(|| {
            Error::store_unavailable(format!("collection {collection} does not exist"))
        })?;
        for row in chunk {
            target
                .rows
                .insert((row.hex.clone(), row.timestamp), row.clone());
        }
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for MemoryStore {
    async fn exists(&self, collection: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(collection))
    }

    async fn provision(&self, collection: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.contains_key(collection) {
            return Err(Error::provision_failed(format!(
                "collection {collection} already exists"
            )));
        }
        collections.insert(collection.to_string(), Collection::default());
        info!(collection = %collection, "Provisioned collection");
        Ok(())
    }

    async fn batch_write(&self, collection: &str, rows: Vec<FlightRow>) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let count = rows.len();
        let chunks =
            batch::write_chunked(&rows, &self.config, |chunk| {
                let result = self.put_chunk(collection, chunk);
                async move { result }
            })
            .await?;

        debug!(
            collection = %collection,
            count = count,
            chunks = chunks,
            "Wrote batch"
        );
        Ok(())
    }

    async fn get(&self, collection: &str, hex: &str, timestamp: i64) -> Result<Option<FlightRow>> {
        let collections = self.collections.read();
        let source = collections.get(collection).ok_or_else(|| {
            Error::store_unavailable(format!("collection {collection} does not exist"))
        })?;
        Ok(source.rows.get(&(hex.to_string(), timestamp)).cloned())
    }

    async fn query_by_timestamp(&self, collection: &str, timestamp: i64) -> Result<Vec<FlightRow>> {
        let collections = self.collections.read();
        let source = collections.get(collection).ok_or_else(|| {
            Error::store_unavailable(format!("collection {collection} does not exist"))
        })?;
        Ok(source
            .rows
            .values()
            .filter(|row| row.timestamp == timestamp)
            .cloned()
            .collect())
    }

    async fn drop_collection(&self, collection: &str) -> Result<()> {
        let mut collections = self.collections.write();
        if collections.remove(collection).is_none() {
            return Err(Error::store_unavailable(format!(
                "collection {collection} does not exist"
            )));
        }
        info!(collection = %collection, "Dropped collection");
        Ok(())
    }
}
