//! Error-path tests for the ingestion pipeline.

use integration_tests::mocks::RecordingStore;
use integration_tests::setup::{TestContext, COLLECTION};
use integration_tests::fixtures;
use std::fs;
use std::sync::Arc;
use store_gateway::{StorageGateway, StoreConfig};
use worker::IngestWorker;

/// Missing snapshot resource: the tick errors with SNAP_001 and nothing is
/// provisioned or written.
#[tokio::test]
async fn test_missing_snapshot_leaves_store_untouched() {
    let ctx = TestContext::new();

    let err = ctx.ingest.ingest_latest().await.unwrap_err();
    assert_eq!(err.error_code(), Some("SNAP_001"));
    assert!(!ctx.store.exists(COLLECTION).await.unwrap());
}

/// A torn or half-written document reads as malformed, not as a crash.
#[tokio::test]
async fn test_torn_snapshot_is_malformed() {
    let ctx = TestContext::new();
    fs::write(&ctx.snapshot_path, br#"{"now": 1000, "aircraft": [{"#).unwrap();

    let err = ctx.ingest.ingest_latest().await.unwrap_err();
    assert_eq!(err.error_code(), Some("SNAP_002"));
    assert!(!ctx.store.exists(COLLECTION).await.unwrap());
}

/// Throttling past the retry budget surfaces as a terminal STORE_001; the
/// caller gets no partial-success information.
#[tokio::test]
async fn test_retry_budget_exhaustion_is_terminal() {
    let ctx = TestContext::with_store_config(StoreConfig {
        chunk_size: 25,
        max_retries: 2,
        retry_backoff_ms: 1,
    });
    ctx.publish(&fixtures::snapshot(1000, 50));
    // More throttles than the budget of any single chunk.
    ctx.store.throttle_next_chunks(10);

    let err = ctx.ingest.ingest_latest().await.unwrap_err();
    assert_eq!(err.error_code(), Some("STORE_001"));
}

/// A store outage is surfaced to the caller; a later tick retries from
/// scratch and succeeds once the store is back.
#[tokio::test]
async fn test_store_outage_then_recovery() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("flights.json");
    generator::write_snapshot(&snapshot_path, &fixtures::snapshot(1000, 10)).unwrap();

    let store = Arc::new(RecordingStore::new());
    let ingest = IngestWorker::new(store.clone(), snapshot_path, COLLECTION.to_string());

    store.set_should_fail(true);
    let err = ingest.ingest_latest().await.unwrap_err();
    assert_eq!(err.error_code(), Some("STORE_001"));
    assert_eq!(store.row_count(), 0);

    store.set_should_fail(false);
    let submitted = ingest.ingest_latest().await.expect("recovery ingest failed");
    assert_eq!(submitted, 10);
    assert_eq!(store.row_count(), 10);
}

/// Provisioning failure is fatal: the error classifies as run-ending rather
/// than tick-local.
#[tokio::test]
async fn test_provision_failure_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let snapshot_path = dir.path().join("flights.json");
    generator::write_snapshot(&snapshot_path, &fixtures::snapshot(1000, 10)).unwrap();

    let store = Arc::new(integration_tests::mocks::ProvisionDeniedStore);
    let ingest = IngestWorker::new(store, snapshot_path, COLLECTION.to_string());

    let err = ingest.ingest_latest().await.unwrap_err();
    assert_eq!(err.error_code(), Some("STORE_003"));
    assert!(err.is_fatal());
}
