//! Internal metrics collection.
//!
//! Counters accumulate in-memory across the bounded run and are logged as a
//! snapshot at shutdown.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn reset(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

/// Collected metrics for the flight feed.
#[derive(Debug, Default)]
pub struct Metrics {
    // Producer side
    pub snapshots_generated: Counter,
    pub records_generated: Counter,
    pub duplicate_idents: Counter,
    pub snapshot_write_errors: Counter,

    // Consumer side
    pub snapshots_ingested: Counter,
    pub records_submitted: Counter,
    pub records_skipped_invalid: Counter,
    pub ticks_skipped_no_snapshot: Counter,

    // Store
    pub chunks_written: Counter,
    pub write_retries: Counter,
    pub writes_throttled: Counter,
    pub store_errors: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            snapshots_generated: self.snapshots_generated.get(),
            records_generated: self.records_generated.get(),
            duplicate_idents: self.duplicate_idents.get(),
            snapshot_write_errors: self.snapshot_write_errors.get(),
            snapshots_ingested: self.snapshots_ingested.get(),
            records_submitted: self.records_submitted.get(),
            records_skipped_invalid: self.records_skipped_invalid.get(),
            ticks_skipped_no_snapshot: self.ticks_skipped_no_snapshot.get(),
            chunks_written: self.chunks_written.get(),
            write_retries: self.write_retries.get(),
            writes_throttled: self.writes_throttled.get(),
            store_errors: self.store_errors.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub snapshots_generated: u64,
    pub records_generated: u64,
    pub duplicate_idents: u64,
    pub snapshot_write_errors: u64,
    pub snapshots_ingested: u64,
    pub records_submitted: u64,
    pub records_skipped_invalid: u64,
    pub ticks_skipped_no_snapshot: u64,
    pub chunks_written: u64,
    pub write_retries: u64,
    pub writes_throttled: u64,
    pub store_errors: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
