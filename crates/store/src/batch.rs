//! Chunking and retry for batch writes.
//!
//! A batch of any size is split into per-request chunks; each chunk is
//! retried through a bounded budget with linear backoff when the store
//! throttles it. There is no partial-success reporting: once a chunk
//! exhausts its budget the whole batch fails and the caller cannot know
//! which earlier chunks landed.

use crate::config::StoreConfig;
use feed_core::{Error, Result};
use std::future::Future;
use telemetry::metrics;
use tracing::warn;

use crate::gateway::FlightRow;

/// Writes `rows` through `write_chunk` in chunks of `config.chunk_size`,
/// retrying throttled chunks. Returns the number of chunks written.
pub async fn write_chunked<'a, F, Fut>(
    rows: &'a [FlightRow],
    config: &StoreConfig,
    mut write_chunk: F,
) -> Result<usize>
where
    F: FnMut(&'a [FlightRow]) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let chunk_size = config.chunk_size.max(1);
    let mut written = 0;

    for chunk in rows.chunks(chunk_size) {
        write_with_retry(chunk, config, &mut write_chunk).await?;
        written += 1;
        metrics().chunks_written.inc();
    }

    Ok(written)
}

/// Writes a single chunk with the configured retry budget.
async fn write_with_retry<'a, F, Fut>(
    chunk: &'a [FlightRow],
    config: &StoreConfig,
    write_chunk: &mut F,
) -> Result<()>
where
    F: FnMut(&'a [FlightRow]) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut last_error = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            let backoff = config.retry_backoff() * attempt;
            warn!(
                attempt = attempt,
                backoff_ms = %backoff.as_millis(),
                "Retrying throttled chunk"
            );
            metrics().write_retries.inc();
            tokio::time::sleep(backoff).await;
        }

        match write_chunk(chunk).await {
            Ok(()) => return Ok(()),
            Err(e) if e.is_retryable() => {
                metrics().writes_throttled.inc();
                last_error = Some(e);
            }
            Err(e) => return Err(e),
        }
    }

    let last = last_error
        .unwrap_or_else(|| Error::internal("chunk write failed with unknown error"));
    Err(Error::store_unavailable(format!(
        "retry budget exhausted after {} retries: {}",
        config.max_retries, last
    )))
}
