//! Schedulers and pipeline workers for the flight feed.
//!
//! - `scheduler`: the self-rescheduling periodic driver
//! - `generate`: producer-side tick (synthesize + overwrite the snapshot)
//! - `ingest`: consumer-side tick (read, stamp, batch-write)
//! - `orchestrator`: wires both sides together for a bounded run

pub mod generate;
pub mod ingest;
pub mod orchestrator;
pub mod scheduler;

pub use generate::GeneratorWorker;
pub use ingest::IngestWorker;
pub use orchestrator::{Orchestrator, RunConfig};
pub use scheduler::{RepeatingScheduler, TickTask};
