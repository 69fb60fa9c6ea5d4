//! Broker configuration with validation.

use crate::domain::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default wait bound for call-mode requests
pub const DEFAULT_API_TIMEOUT_MS: u64 = 5_000;

/// Default period of the stale-registration sweep
pub const DEFAULT_SWEEP_INTERVAL_MS: u64 = 30_000;

/// Correlation broker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Maximum wait for a matching response, applied to every call
    pub api_timeout_ms: u64,
    /// How often registrations nobody awaits are swept
    pub sweep_interval_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            api_timeout_ms: DEFAULT_API_TIMEOUT_MS,
            sweep_interval_ms: DEFAULT_SWEEP_INTERVAL_MS,
        }
    }
}

impl BrokerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ONEBOT_API_TIMEOUT_MS`: Wait bound (default: 5000)
    /// - `ONEBOT_SWEEP_INTERVAL_MS`: Sweep period (default: 30000)
    ///
    /// Values that do not parse fall back to the default.
    pub fn from_env() -> Self {
        Self {
            api_timeout_ms: env_u64("ONEBOT_API_TIMEOUT_MS").unwrap_or(DEFAULT_API_TIMEOUT_MS),
            sweep_interval_ms: env_u64("ONEBOT_SWEEP_INTERVAL_MS")
                .unwrap_or(DEFAULT_SWEEP_INTERVAL_MS),
        }
    }

    /// Builder-style override of the wait bound
    pub fn with_api_timeout(mut self, timeout: Duration) -> Self {
        self.api_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(
                "api_timeout_ms cannot be 0".into(),
            ));
        }

        if self.sweep_interval_ms == 0 {
            return Err(ConfigError::InvalidSweepInterval(
                "sweep_interval_ms cannot be 0".into(),
            ));
        }

        Ok(())
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_millis(self.api_timeout_ms)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms)
    }
}

fn env_u64(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}
