//! The storage gateway trait the pipeline writes through.

use async_trait::async_trait;
use feed_core::{AircraftState, Error, Result};
use serde::{Deserialize, Serialize};

/// Stored flight record. Keyed by (`hex`, `timestamp`): `hex` is the
/// partition key, `timestamp` the sort key. Same-key writes overwrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRow {
    pub hex: String,
    pub flight: String,
    pub alt_geom: i64,
    pub gs: f64,
    pub track: f64,
    pub lat: f64,
    pub lon: f64,
    pub timestamp: i64,
}

impl TryFrom<AircraftState> for FlightRow {
    type Error = Error;

    /// Fails when the record was never stamped with a batch timestamp.
    fn try_from(state: AircraftState) -> Result<Self> {
        let timestamp = state
            .timestamp
            .ok_or_else(|| Error::validation(format!("record {} missing batch timestamp", state.hex)))?;
        Ok(Self {
            hex: state.hex,
            flight: state.flight,
            alt_geom: state.alt_geom,
            gs: state.gs,
            track: state.track,
            lat: state.lat,
            lon: state.lon,
            timestamp,
        })
    }
}

/// A partitioned keyed store of flight records.
///
/// Absence is data, not failure: `exists` answers `Ok(false)` and `get`
/// answers `Ok(None)` for things that are not there. Errors mean the store
/// itself failed.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Whether the named collection has been provisioned.
    async fn exists(&self, collection: &str) -> Result<bool>;

    /// Creates a collection keyed by (`hex`, `timestamp`) and returns once it
    /// accepts writes. Errors with `STORE_003` when the collection already
    /// exists; callers are expected to check `exists` first.
    async fn provision(&self, collection: &str) -> Result<()>;

    /// Writes an unbounded sequence of rows. The gateway chunks to its
    /// per-request limit and retries throttled chunks internally. A `STORE_001`
    /// error after the retry budget means an unknown subset of earlier chunks
    /// was written, so callers must treat the batch as all-or-nothing-best-effort.
    async fn batch_write(&self, collection: &str, rows: Vec<FlightRow>) -> Result<()>;

    /// Point lookup by composite key.
    async fn get(&self, collection: &str, hex: &str, timestamp: i64) -> Result<Option<FlightRow>>;

    /// All rows stamped with the given batch timestamp.
    async fn query_by_timestamp(&self, collection: &str, timestamp: i64) -> Result<Vec<FlightRow>>;

    /// Drops the collection and everything in it.
    async fn drop_collection(&self, collection: &str) -> Result<()>;
}
