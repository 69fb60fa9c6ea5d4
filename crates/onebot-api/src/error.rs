//! Errors raised by the typed API layer.
//!
//! Transport-level failures (missing connection, timeout) never reach
//! callers as errors; they are folded into the `-1` / `"failed"` base pair
//! of the reply. Only local precondition and encoding failures surface here.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was empty. Raised before anything is sent.
    #[error("Invalid argument: `{0}` must not be empty")]
    InvalidArgument(&'static str),

    #[error("Failed to encode request parameters: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ApiError::InvalidArgument(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Fail with [`ApiError::InvalidArgument`] when `value` is empty
pub(crate) fn require_non_empty(name: &'static str, value: &str) -> ApiResult<()> {
    if value.is_empty() {
        Err(ApiError::InvalidArgument(name))
    } else {
        Ok(())
    }
}
