//! Snapshot and record builders.

use feed_core::{AircraftState, Snapshot};

/// A valid record with a deterministic ident.
pub fn aircraft(hex: &str) -> AircraftState {
    AircraftState {
        hex: hex.to_string(),
        flight: "abc1234".to_string(),
        alt_geom: 10475,
        gs: 295.1,
        track: 91.2,
        lat: 39.874878,
        lon: -104.454186,
        timestamp: None,
    }
}

/// A snapshot with `n` distinct idents sharing one timestamp.
pub fn snapshot(now: i64, n: usize) -> Snapshot {
    let aircraft = (0..n).map(|i| aircraft(&format!("{i:06x}"))).collect();
    Snapshot::new(now, aircraft)
}

/// A snapshot where every record carries the same ident.
pub fn snapshot_all_duplicates(now: i64, n: usize) -> Snapshot {
    let aircraft = (0..n).map(|_| aircraft("abcdef")).collect();
    Snapshot::new(now, aircraft)
}
