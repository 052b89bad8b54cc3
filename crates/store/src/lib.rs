//! Keyed-store gateway for the flight feed.
//!
//! The pipeline only sees the [`StorageGateway`] trait; the in-memory backend
//! here is one implementation of it. Chunking and retry live in `batch` so
//! any backend gets the same write semantics.

pub mod batch;
pub mod config;
pub mod gateway;
pub mod memory;

pub use config::StoreConfig;
pub use gateway::{FlightRow, StorageGateway};
pub use memory::MemoryStore;
