//! Synthetic flight generator.

use chrono::Utc;
use feed_core::{AircraftState, Snapshot};
use rand::Rng;
use std::collections::HashSet;
use telemetry::metrics;
use tracing::debug;

const HEX_ALPHABET: &[u8] = b"0123456789abcdef";
const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";

// Fixed motion placeholders. The feed exists to produce write load, not a
// physically plausible sky.
const ALT_GEOM: i64 = 10475;
const GROUND_SPEED: f64 = 295.1;
const TRACK: f64 = 91.2;
const LAT: f64 = 39.874878;
const LON: f64 = -104.454186;

/// Produces one snapshot per call: a fixed count of random aircraft sharing
/// a single batch timestamp.
#[derive(Debug, Clone)]
pub struct FlightSynthesizer {
    count: usize,
}

impl Default for FlightSynthesizer {
    fn default() -> Self {
        Self { count: 300 }
    }
}

impl FlightSynthesizer {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Generates a fresh snapshot stamped with the current epoch second.
    ///
    /// Idents are drawn with replacement. Collisions are counted and logged
    /// but NOT removed: the emitted sequence is the original draw, and the
    /// store's (`hex`, `timestamp`) key silently overwrites colliding rows.
    pub fn generate(&self) -> Snapshot {
        let mut rng = rand::thread_rng();

        let idents: Vec<String> = (0..self.count)
            .map(|_| random_string(&mut rng, HEX_ALPHABET, 6))
            .collect();

        let distinct = idents.iter().collect::<HashSet<_>>().len();
        if distinct < idents.len() {
            let collisions = (idents.len() - distinct) as u64;
            metrics().duplicate_idents.inc_by(collisions);
            debug!(collisions, "Snapshot contains colliding idents");
        }

        let now = Utc::now().timestamp();
        let aircraft = idents
            .into_iter()
            .map(|hex| AircraftState {
                hex,
                flight: format!(
                    "{}{}",
                    random_string(&mut rng, LETTERS, 3),
                    random_string(&mut rng, DIGITS, 4)
                ),
                alt_geom: ALT_GEOM,
                gs: GROUND_SPEED,
                track: TRACK,
                lat: LAT,
                lon: LON,
                timestamp: None,
            })
            .collect();

        Snapshot::new(now, aircraft)
    }
}

fn random_string(rng: &mut impl Rng, alphabet: &[u8], len: usize) -> String {
    (0..len)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}
