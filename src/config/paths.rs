// Per-user path resolution
// ~/.latchkey/credentials.toml unless overridden

use std::path::PathBuf;

use super::constants::{
    CREDENTIALS_ENV_VAR, CREDENTIALS_FILE_NAME, HOME_DIR_NAME, HOME_ENV_VAR, SETTINGS_FILE_NAME,
};

/// Where the credentials file lives.
///
/// Resolved every time a manager is constructed, so a reset picks up
/// environment changes made since the previous construction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PathSource {
    /// `$LATCHKEY_CREDENTIALS`, else `$LATCHKEY_HOME/credentials.toml`,
    /// else `~/.latchkey/credentials.toml`.
    #[default]
    Default,
    /// An explicit path (from `--credentials` or a test fixture).
    Fixed(PathBuf),
}

impl PathSource {
    /// Resolve to a concrete path. `None` only when the home directory
    /// cannot be determined and no override is set.
    pub fn resolve(&self) -> Option<PathBuf> {
        match self {
            PathSource::Fixed(path) => Some(path.clone()),
            PathSource::Default => match non_empty_env(CREDENTIALS_ENV_VAR) {
                Some(path) => Some(PathBuf::from(path)),
                None => latchkey_home().map(|home| home.join(CREDENTIALS_FILE_NAME)),
            },
        }
    }
}

/// The latchkey home directory (`$LATCHKEY_HOME` or `~/.latchkey`).
pub fn latchkey_home() -> Option<PathBuf> {
    if let Some(home) = non_empty_env(HOME_ENV_VAR) {
        return Some(PathBuf::from(home));
    }
    dirs::home_dir().map(|home| home.join(HOME_DIR_NAME))
}

/// Path of the optional settings file.
pub fn settings_path() -> Option<PathBuf> {
    latchkey_home().map(|home| home.join(SETTINGS_FILE_NAME))
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
