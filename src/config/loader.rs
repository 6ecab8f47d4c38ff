// Configuration loader
// Loads settings from ~/.latchkey/config.toml, falling back to defaults

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::paths::settings_path;
use super::settings::Settings;

/// Load settings from the latchkey home, or defaults when the file is absent.
pub fn load_settings() -> Result<Settings> {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => {
            tracing::debug!("No home directory; using default settings");
            Ok(Settings::default())
        }
    }
}

/// Load settings from an explicit file. A missing file is not an error.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Settings file not found; using defaults");
        return Ok(Settings::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file: {}", path.display()))?;

    let settings: Settings = toml::from_str(&contents).with_context(|| {
        format!(
            "Failed to parse settings file: {}\n\nFix or delete the file and try again.",
            path.display()
        )
    })?;

    tracing::debug!(path = %path.display(), "Loaded settings");
    Ok(settings)
}
