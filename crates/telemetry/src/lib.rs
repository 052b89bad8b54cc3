//! Internal telemetry for the flight feed.
//!
//! Structured logging via `tracing` plus a small in-process counter registry.
//! Counters are logged as a snapshot at shutdown rather than shipped to an
//! external metrics system.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::*;
pub use tracing_setup::*;
