// Configuration loading

pub mod integrations;
pub mod settings;

pub use integrations::{CardsConfig, ConfigError, Integrations, WebhookConfig};
pub use settings::Settings;

use std::path::PathBuf;

/// Directory holding every smeta configuration file.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("smeta")
}
