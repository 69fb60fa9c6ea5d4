//! Error types for the correlation core.
//!
//! Every failure here is local to one call: none of them touches other
//! in-flight calls or the broker itself. Callers collapse them into the
//! protocol's sentinel result pair (see [`codes`]).

use crate::domain::connection::ConnectionId;
use crate::domain::correlation::CorrelationId;

/// Base result pair values used on the wire and as sentinels
pub mod codes {
    /// Successful `retcode`
    pub const RETCODE_OK: i32 = 0;
    /// Sentinel `retcode` for missing, unparseable or failed results
    pub const RETCODE_FAILED: i32 = -1;

    /// Successful `status`
    pub const STATUS_OK: &str = "ok";
    /// Sentinel `status` when the field is absent or the call failed locally
    pub const STATUS_FAILED: &str = "failed";
}

/// Failure of a single call-mode or fire-and-forget request
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// No live transport for the connection; nothing was registered
    #[error("connection not found: {0}")]
    ConnectionNotFound(ConnectionId),

    /// No matching response arrived within the wait bound
    #[error("{action} ({correlation_id}) timed out after {timeout_ms}ms")]
    Timeout {
        correlation_id: CorrelationId,
        action: String,
        timeout_ms: u64,
    },

    /// The request could not be serialised
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CallError {
    /// True for the timeout outcome
    pub fn is_timeout(&self) -> bool {
        matches!(self, CallError::Timeout { .. })
    }
}

/// Result type for broker and caller operations
pub type CallResult<T> = Result<T, CallError>;

/// Configuration validation errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("invalid sweep interval: {0}")]
    InvalidSweepInterval(String),
}
