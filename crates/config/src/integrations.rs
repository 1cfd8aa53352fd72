// Outbound integration credentials
// Loaded from ~/.config/smeta/integrations.toml
//
//   [webhook]
//   url = "https://script.example.com/exec"
//
//   [cards]
//   key = "..."
//   token = "..."
//   list_id = "..."

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Marker left in credentials that were never filled in.
pub const PLACEHOLDER_MARKER: &str = "PASTE_";

pub const DEFAULT_CARDS_API_BASE: &str = "https://api.trello.com";

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// File could not be read.
    Io(String),
    /// TOML parse / deserialization error.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Parse(msg) => write!(f, "config parse error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Integrations {
    #[serde(default)]
    pub webhook: Option<WebhookConfig>,
    #[serde(default)]
    pub cards: Option<CardsConfig>,
}

/// Generic JSON webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub url: String,
}

/// Card tracker API credentials and the list new cards land in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardsConfig {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub list_id: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            token: String::new(),
            list_id: String::new(),
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_CARDS_API_BASE.to_string()
}

/// True when a credential is blank or still holds the placeholder.
pub fn is_unset(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.contains(PLACEHOLDER_MARKER)
}

impl WebhookConfig {
    pub fn is_configured(&self) -> bool {
        !is_unset(&self.url)
    }
}

impl CardsConfig {
    /// Names of the credentials that are still unset.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("key", self.key.as_str()),
            ("token", self.token.as_str()),
            ("list_id", self.list_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| is_unset(value))
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_configured(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

impl Integrations {
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("integrations.toml")
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load from the default location. A missing file means nothing is configured.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        if !path.exists() {
            log::debug!("No integrations file at {}", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_toml(&contents)
    }

    /// Webhook settings, when present and filled in.
    pub fn webhook(&self) -> Option<&WebhookConfig> {
        self.webhook.as_ref().filter(|w| w.is_configured())
    }

    /// Card tracker settings, when present and filled in.
    pub fn cards(&self) -> Option<&CardsConfig> {
        self.cards.as_ref().filter(|c| c.is_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_full_file() {
        let integrations = Integrations::from_toml(
            r#"
[webhook]
url = "https://hooks.example.com/estimate"

[cards]
key = "k1"
token = "t1"
list_id = "list42"
"#,
        )
        .unwrap();

        assert_eq!(integrations.webhook().unwrap().url, "https://hooks.example.com/estimate");
        let cards = integrations.cards().unwrap();
        assert_eq!(cards.list_id, "list42");
        assert_eq!(cards.api_base, DEFAULT_CARDS_API_BASE);
    }

    #[test]
    fn test_placeholders_count_as_unset() {
        let integrations = Integrations::from_toml(
            r#"
[webhook]
url = "PASTE_YOUR_URL"

[cards]
key = "PASTE_KEY"
token = "real-token"
"#,
        )
        .unwrap();

        assert!(integrations.webhook().is_none());
        assert!(integrations.cards().is_none());
        let cards = integrations.cards.as_ref().unwrap();
        assert_eq!(cards.missing_fields(), vec!["key", "list_id"]);
    }

    #[test]
    fn test_empty_file_is_unconfigured() {
        let integrations = Integrations::from_toml("").unwrap();
        assert_eq!(integrations, Integrations::default());
        assert!(integrations.webhook().is_none());
    }

    #[test]
    fn test_parse_error() {
        let err = Integrations::from_toml("[webhook\nurl = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = tempdir().unwrap();
        let err = Integrations::load_from(&dir.path().join("none.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("integrations.toml");
        fs::write(&path, "[cards]\nkey = \"a\"\ntoken = \"b\"\nlist_id = \"c\"\napi_base = \"http://localhost:1\"\n").unwrap();
        let integrations = Integrations::load_from(&path).unwrap();
        assert_eq!(integrations.cards().unwrap().api_base, "http://localhost:1");
    }
}
