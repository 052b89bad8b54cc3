//! Flight telemetry feed
//!
//! Generates synthetic aircraft position snapshots on a fixed cadence and
//! ingests each one into a partitioned keyed store:
//! - producer scheduler: synthesize + overwrite the shared snapshot file
//! - consumer scheduler: read, stamp, chunked batch-write with retry
//! - bounded run with guaranteed scheduler cleanup

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use store_gateway::{MemoryStore, StoreConfig};
use telemetry::init_tracing_from_env;
use worker::{Orchestrator, RunConfig};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    /// Shared snapshot document path
    #[serde(default = "default_snapshot_path")]
    snapshot_path: String,

    /// Destination collection name
    #[serde(default = "default_collection")]
    collection: String,

    /// Records per generated snapshot
    #[serde(default = "default_records_per_snapshot")]
    records_per_snapshot: usize,

    /// Producer tick interval in seconds
    #[serde(default = "default_interval_secs")]
    producer_interval_secs: u64,

    /// Consumer tick interval in seconds
    #[serde(default = "default_interval_secs")]
    consumer_interval_secs: u64,

    /// Total run duration in seconds
    #[serde(default = "default_run_duration_secs")]
    run_duration_secs: u64,

    #[serde(default)]
    store: StoreConfig,
}

fn default_snapshot_path() -> String {
    "flights.json".to_string()
}

fn default_collection() -> String {
    "flights".to_string()
}

fn default_records_per_snapshot() -> usize {
    300
}

fn default_interval_secs() -> u64 {
    1
}

fn default_run_duration_secs() -> u64 {
    3600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
            collection: default_collection(),
            records_per_snapshot: default_records_per_snapshot(),
            producer_interval_secs: default_interval_secs(),
            consumer_interval_secs: default_interval_secs(),
            run_duration_secs: default_run_duration_secs(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            snapshot_path: self.snapshot_path.clone().into(),
            collection: self.collection.clone(),
            records_per_snapshot: self.records_per_snapshot,
            producer_interval: Duration::from_secs(self.producer_interval_secs),
            consumer_interval: Duration::from_secs(self.consumer_interval_secs),
            run_for: Duration::from_secs(self.run_duration_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting flight feed v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;
    info!(
        collection = %config.collection,
        snapshot = %config.snapshot_path,
        run_secs = config.run_duration_secs,
        "Loaded configuration"
    );

    let store = Arc::new(MemoryStore::new(config.store.clone()));
    let orchestrator = Orchestrator::new(config.run_config(), store);

    // Race the bounded run against the shutdown signal. Dropping the run
    // future stops both schedulers.
    tokio::select! {
        result = orchestrator.run() => {
            result.context("Feed run failed")?;
        }
        _ = shutdown_signal() => {
            info!("Shutting down early on signal");
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("FLIGHTFEED")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested store config from environment; the config
    // crate's nested parsing is unreliable with underscored field names.
    if let Ok(chunk_size) = std::env::var("FLIGHTFEED_STORE_CHUNK_SIZE") {
        config.store.chunk_size = chunk_size
            .parse()
            .context("Invalid FLIGHTFEED_STORE_CHUNK_SIZE")?;
    }
    if let Ok(max_retries) = std::env::var("FLIGHTFEED_STORE_MAX_RETRIES") {
        config.store.max_retries = max_retries
            .parse()
            .context("Invalid FLIGHTFEED_STORE_MAX_RETRIES")?;
    }
    if let Ok(backoff) = std::env::var("FLIGHTFEED_STORE_RETRY_BACKOFF_MS") {
        config.store.retry_backoff_ms = backoff
            .parse()
            .context("Invalid FLIGHTFEED_STORE_RETRY_BACKOFF_MS")?;
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
