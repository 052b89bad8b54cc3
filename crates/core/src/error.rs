//! Unified error types for the flight feed.
//!
//! Error codes:
//! - STORE_001-003: Store errors
//! - SNAP_001-002: Snapshot errors

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Store error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// STORE_001: Store unavailable (transport, auth, or service-side failure)
    Unavailable,
    /// STORE_002: Write throttled by the store
    Throttled,
    /// STORE_003: Collection could not be provisioned
    ProvisionFailed,
}

impl StoreErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unavailable => "STORE_001",
            Self::Throttled => "STORE_002",
            Self::ProvisionFailed => "STORE_003",
        }
    }
}

/// Snapshot error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotErrorCode {
    /// SNAP_001: Snapshot resource does not exist yet
    Missing,
    /// SNAP_002: Snapshot resource exists but could not be parsed
    Malformed,
}

impl SnapshotErrorCode {
    /// Get the error code string.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "SNAP_001",
            Self::Malformed => "SNAP_002",
        }
    }
}

/// Unified error type for the flight feed.
#[derive(Debug, Error)]
pub enum Error {
    /// Store error with code. Throttled writes are retryable inside the
    /// gateway's batch writer; everything else fails the current operation.
    #[error("[{code}] {message}")]
    Store {
        code: &'static str,
        message: String,
        retryable: bool,
    },

    /// Collection provisioning failure. Fatal to the whole run: without a
    /// destination there is nothing for later ticks to retry against.
    #[error("[{code}] {message}")]
    Provision { code: &'static str, message: String },

    /// The shared snapshot resource is missing or unreadable. The current
    /// tick is skipped; the next tick reads again.
    #[error("[{code}] {message}")]
    Snapshot { code: &'static str, message: String },

    #[error("validation error: {0}")]
    Validation(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a non-retryable store error.
    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Self::Store {
            code: StoreErrorCode::Unavailable.code(),
            message: msg.into(),
            retryable: false,
        }
    }

    /// Create a throttled-write error (retryable within the batch writer).
    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::Store {
            code: StoreErrorCode::Throttled.code(),
            message: msg.into(),
            retryable: true,
        }
    }

    /// Create a provisioning error.
    pub fn provision_failed(msg: impl Into<String>) -> Self {
        Self::Provision {
            code: StoreErrorCode::ProvisionFailed.code(),
            message: msg.into(),
        }
    }

    /// Create a missing-snapshot error.
    pub fn snapshot_missing(msg: impl Into<String>) -> Self {
        Self::Snapshot {
            code: SnapshotErrorCode::Missing.code(),
            message: msg.into(),
        }
    }

    /// Create a malformed-snapshot error.
    pub fn snapshot_malformed(msg: impl Into<String>) -> Self {
        Self::Snapshot {
            code: SnapshotErrorCode::Malformed.code(),
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether the batch writer may retry the failed operation.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store { retryable: true, .. })
    }

    /// Whether this error should terminate the whole run rather than the
    /// current tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Provision { .. })
    }

    /// Get the error code if this is a coded error.
    pub fn error_code(&self) -> Option<&'static str> {
        match self {
            Self::Store { code, .. } => Some(code),
            Self::Provision { code, .. } => Some(code),
            Self::Snapshot { code, .. } => Some(code),
            _ => None,
        }
    }
}
