//! Wire types for the snapshot document and its records.
//!
//! The snapshot document mirrors the dump1090 `aircraft.json` shape: a
//! top-level `now` (epoch seconds) plus an `aircraft` array. Every record in
//! one snapshot shares the snapshot's `now` as its `timestamp` once stamped
//! by the ingestion side.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

/// 6-character lowercase-hex transponder ident.
static HEX_IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-f]{6}$").expect("hex ident regex"));

/// 3 lowercase letters + 4 digits callsign.
static CALLSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]{3}[0-9]{4}$").expect("callsign regex"));

/// A single aircraft position report.
///
/// `timestamp` is absent in freshly generated snapshots and assigned by the
/// ingestion pipeline from the snapshot's `now`. Records never change after
/// they reach the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AircraftState {
    /// Transponder ident. Intended unique per generation cycle, but
    /// duplicates can occur; the store's composite key absorbs them.
    #[validate(regex(path = *HEX_IDENT_RE))]
    pub hex: String,
    /// Callsign. Not unique.
    #[validate(regex(path = *CALLSIGN_RE))]
    pub flight: String,
    /// Geometric altitude, feet.
    pub alt_geom: i64,
    /// Ground speed, knots.
    pub gs: f64,
    /// True track, degrees.
    #[validate(range(min = 0.0, max = 360.0))]
    pub track: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lon: f64,
    /// Batch timestamp, epoch seconds. Shared by every record of a snapshot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl AircraftState {
    /// Assigns `now` as the batch timestamp unless one is already present.
    pub fn stamp(&mut self, now: i64) {
        if self.timestamp.is_none() {
            self.timestamp = Some(now);
        }
    }
}

/// One full generation cycle: a shared timestamp plus the records produced
/// under it. Exactly one snapshot is live at a time at a fixed path; each new
/// snapshot fully replaces the prior one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Epoch seconds at generation time.
    pub now: i64,
    pub aircraft: Vec<AircraftState>,
}

impl Snapshot {
    pub fn new(now: i64, aircraft: Vec<AircraftState>) -> Self {
        Self { now, aircraft }
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    /// Consumes the snapshot, stamping every record with `now` where no
    /// timestamp is present yet.
    pub fn into_stamped_records(self) -> Vec<AircraftState> {
        let now = self.now;
        let mut aircraft = self.aircraft;
        for state in &mut aircraft {
            state.stamp(now);
        }
        aircraft
    }
}
