//! Store configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Maximum records per write request
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Number of retries for a throttled chunk
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Retry backoff in milliseconds
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

// 25 is the per-request item limit of the batch-write API the feed was
// originally pointed at.
fn default_chunk_size() -> usize {
    25
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    100
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
            max_retries: default_max_retries(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

impl StoreConfig {
    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}
