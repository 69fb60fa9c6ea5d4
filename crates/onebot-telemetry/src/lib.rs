//! # OneBot Telemetry
//!
//! Structured logging and Prometheus metrics for OneBot Link.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use onebot_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     init_telemetry(&TelemetryConfig::from_env())?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `ONEBOT_SERVICE_NAME` | `onebot-link` | Service name in log output |
//! | `ONEBOT_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `ONEBOT_CONSOLE_OUTPUT` | `true` | Write logs to the console |
//! | `ONEBOT_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod metrics;
mod tracing_setup;

pub use config::{TelemetryConfig, DEFAULT_LOG_LEVEL, DEFAULT_SERVICE_NAME};
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, CALLS_ABANDONED, CALLS_REGISTERED,
    CALLS_RESOLVED, CALLS_TIMED_OUT, CALL_DURATION, PENDING_CALLS, REGISTRY, RESPONSES_UNMATCHED,
};
pub use tracing_setup::{build_filter, init_tracing};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber and register all metrics.
///
/// Calling it a second time returns [`TelemetryError::TracerInit`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    init_tracing(config)?;
    register_metrics()?;
    Ok(())
}
