// Configuration structs

use serde::{Deserialize, Serialize};

use super::constants::DEFAULT_LOG_LEVEL;

/// Logging configuration (`[logging]`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// tracing filter directive, e.g. "warn" or "latchkey=debug"
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Telemetry preferences (`[telemetry]`)
///
/// Only affects which notice is printed after activation; latchkey itself
/// never sends anything over the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_true")]
    pub gather_usage_stats: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            gather_usage_stats: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Top-level settings read from `~/.latchkey/config.toml`.
/// Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
