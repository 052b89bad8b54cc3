//! The shared snapshot resource.
//!
//! One document at a fixed path, written wholesale by the producer and read
//! wholesale by the consumer. There is no lock, no version stamp, and no
//! atomic replace: a reader racing the writer can observe a stale, torn, or
//! duplicate snapshot. A torn read parses as malformed and skips that tick.

use feed_core::{Error, Result, Snapshot};
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Overwrites the snapshot document in place (truncating, non-atomic).
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let json = serde_json::to_vec(snapshot)?;
    fs::write(path, json)?;
    debug!(
        path = %path.display(),
        now = snapshot.now,
        count = snapshot.len(),
        "Wrote snapshot"
    );
    Ok(())
}

/// Reads whatever snapshot is currently live.
pub fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(Error::snapshot_missing(format!(
                "no snapshot at {}",
                path.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_slice(&bytes).map_err(|e| {
        Error::snapshot_malformed(format!("unreadable snapshot at {}: {e}", path.display()))
    })
}
