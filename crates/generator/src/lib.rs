//! Synthetic snapshot generation for the flight feed.

pub mod snapshot;
pub mod synth;

pub use snapshot::{read_snapshot, write_snapshot};
pub use synth::FlightSynthesizer;
