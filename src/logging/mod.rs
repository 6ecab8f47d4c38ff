// Logging setup
//
// tracing-subscriber fmt layer on stderr. LATCHKEY_LOG wins over the
// [logging] level from settings; both fall back to "warn".

use tracing_subscriber::EnvFilter;

use crate::config::constants::{DEFAULT_LOG_LEVEL, LOG_ENV_VAR};
use crate::config::LoggingConfig;

/// Install the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init(config: &LoggingConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(config))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}
