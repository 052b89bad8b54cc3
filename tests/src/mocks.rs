//! Mock implementations for testing.

use async_trait::async_trait;
use feed_core::{Error, Result};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use store_gateway::{FlightRow, StorageGateway};

/// Gateway mock that records every `batch_write` call as handed over by the
/// pipeline, before any chunking would apply. Lets tests verify the exact
/// record sequence the pipeline submits without a real store behind it.
#[derive(Clone, Default)]
pub struct RecordingStore {
    collections: Arc<Mutex<HashSet<String>>>,
    /// One entry per batch_write call.
    batches: Arc<Mutex<Vec<Vec<FlightRow>>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All batch_write calls seen so far.
    pub fn batches(&self) -> Vec<Vec<FlightRow>> {
        self.batches.lock().clone()
    }

    /// Total rows across all batches.
    pub fn row_count(&self) -> usize {
        self.batches.lock().iter().map(Vec::len).sum()
    }

    pub fn clear(&self) {
        self.batches.lock().clear();
    }

    /// Make every store operation fail.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }

    fn check_available(&self) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::store_unavailable("mock store failure"));
        }
        Ok(())
    }
}

/// Gateway mock whose collections can never be provisioned. Drives the
/// fatal-error path: a run without a destination cannot proceed.
#[derive(Clone, Default)]
pub struct ProvisionDeniedStore;

#[async_trait]
impl StorageGateway for ProvisionDeniedStore {
    async fn exists(&self, _collection: &str) -> Result<bool> {
        Ok(false)
    }

    async fn provision(&self, collection: &str) -> Result<()> {
        Err(Error::provision_failed(format!(
            "not authorized to create collection {collection}"
        )))
    }

    async fn batch_write(&self, collection: &str, _rows: Vec<FlightRow>) -> Result<()> {
        Err(Error::store_unavailable(format!(
            "collection {collection} does not exist"
        )))
    }

    async fn get(&self, _collection: &str, _hex: &str, _timestamp: i64) -> Result<Option<FlightRow>> {
        Ok(None)
    }

    async fn query_by_timestamp(&self, _collection: &str, _timestamp: i64) -> Result<Vec<FlightRow>> {
        Ok(Vec::new())
    }

    async fn drop_collection(&self, _collection: &str) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl StorageGateway for RecordingStore {
    async fn exists(&self, collection: &str) -> Result<bool> {
        self.check_available()?;
        Ok(self.collections.lock().contains(collection))
    }

    async fn provision(&self, collection: &str) -> Result<()> {
        self.check_available()?;
        if !self.collections.lock().insert(collection.to_string()) {
            return Err(Error::provision_failed(format!(
                "collection {collection} already exists"
            )));
        }
        Ok(())
    }

    async fn batch_write(&self, _collection: &str, rows: Vec<FlightRow>) -> Result<()> {
        self.check_available()?;
        self.batches.lock().push(rows);
        Ok(())
    }

    async fn get(&self, _collection: &str, hex: &str, timestamp: i64) -> Result<Option<FlightRow>> {
        self.check_available()?;
        Ok(self
            .batches
            .lock()
            .iter()
            .flatten()
            .find(|row| row.hex == hex && row.timestamp == timestamp)
            .cloned())
    }

    async fn query_by_timestamp(&self, _collection: &str, timestamp: i64) -> Result<Vec<FlightRow>> {
        self.check_available()?;
        Ok(self
            .batches
            .lock()
            .iter()
            .flatten()
            .filter(|row| row.timestamp == timestamp)
            .cloned()
            .collect())
    }

    async fn drop_collection(&self, collection: &str) -> Result<()> {
        self.check_available()?;
        self.collections.lock().remove(collection);
        Ok(())
    }
}
