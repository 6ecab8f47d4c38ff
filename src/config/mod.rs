// Configuration module
// Public interface for paths, settings and constants

pub mod constants;
mod loader;
mod paths;
mod settings;

pub use loader::{load_settings, load_settings_from};
pub use paths::{latchkey_home, settings_path, PathSource};
pub use settings::{LoggingConfig, Settings, TelemetryConfig};
