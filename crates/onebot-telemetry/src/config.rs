//! Telemetry configuration from environment variables.

use std::env;

pub const DEFAULT_SERVICE_NAME: &str = "onebot-link";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration for logging and metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log output
    pub service_name: String,

    /// Log filter directive (trace, debug, info, warn, error, or a full `EnvFilter` string)
    pub log_level: String,

    /// Whether to write log lines to the console
    pub console_output: bool,

    /// Whether log lines are JSON instead of human-readable
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            console_output: true,
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ONEBOT_SERVICE_NAME`: Service name (default: onebot-link)
    /// - `ONEBOT_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `ONEBOT_CONSOLE_OUTPUT`: Enable console output (default: true)
    /// - `ONEBOT_JSON_LOGS`: Enable JSON logs (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            service_name: lookup("ONEBOT_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),

            log_level: lookup("ONEBOT_LOG_LEVEL")
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),

            console_output: lookup("ONEBOT_CONSOLE_OUTPUT")
                .map(|v| v.to_lowercase() != "false" && v != "0")
                .unwrap_or(true),

            json_logs: lookup("ONEBOT_JSON_LOGS")
                .map(|v| v.to_lowercase() == "true" || v == "1")
                .unwrap_or(false),
        }
    }
}
