// Project-wide constants
//
// Centralised here so file names and environment variables have one
// source of truth. Import via `use crate::config::constants::*;`.

/// Directory under the user's home that holds all latchkey state.
pub const HOME_DIR_NAME: &str = ".latchkey";

/// Credentials file name inside the latchkey home.
pub const CREDENTIALS_FILE_NAME: &str = "credentials.toml";

/// Optional settings file name inside the latchkey home.
pub const SETTINGS_FILE_NAME: &str = "config.toml";

/// Overrides the latchkey home directory (mostly useful for tests and CI).
pub const HOME_ENV_VAR: &str = "LATCHKEY_HOME";

/// Overrides the credentials file path directly.
pub const CREDENTIALS_ENV_VAR: &str = "LATCHKEY_CREDENTIALS";

/// tracing filter directive, takes precedence over `[logging] level`.
pub const LOG_ENV_VAR: &str = "LATCHKEY_LOG";

/// Default tracing filter when neither the env var nor settings set one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Process exit status for success and the "nothing to do" paths.
pub const EXIT_OK: u8 = 0;

/// Process exit status for every fatal condition.
pub const EXIT_FAILURE: u8 = 1;
