//! Core types, validation, and errors for the flight feed.

pub mod error;
pub mod record;

pub use error::{Error, Result, SnapshotErrorCode, StoreErrorCode};
pub use record::{AircraftState, Snapshot};
