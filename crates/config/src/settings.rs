// Application settings
// Loaded from ~/.config/smeta/settings.json

use serde::{Deserialize, Serialize};
use smeta_core::{NumberStyle, DEFAULT_CURRENCY};
use smeta_engine::{Wizard, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // Number format
    #[serde(rename = "format.decimalSeparator")]
    pub decimal_separator: char,

    #[serde(rename = "format.groupSeparator")]
    pub group_separator: char,

    #[serde(rename = "format.minGroupingDigits")]
    pub min_grouping_digits: usize,

    #[serde(rename = "format.currency")]
    pub currency: String,

    // Calculation
    #[serde(rename = "calc.defaultPercent")]
    pub default_percent: String,

    #[serde(rename = "calc.seedRows")]
    pub seed_rows: bool,
}

impl Default for Settings {
    fn default() -> Self {
        let style = NumberStyle::default();
        Self {
            decimal_separator: style.decimal_separator,
            group_separator: style.group_separator,
            min_grouping_digits: style.min_grouping_digits,
            currency: DEFAULT_CURRENCY.to_string(),
            default_percent: String::new(),
            seed_rows: true,
        }
    }
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        crate::config_dir().join("settings.json")
    }

    /// Load settings from disk, falling back to defaults
    pub fn load() -> Self {
        let path = Self::config_path();

        if !path.exists() {
            let settings = Self::default();
            settings.create_default_file(&path);
            return settings;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path. Unreadable or malformed files yield defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_json_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Error parsing {}: {}; using default settings", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Error reading {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse settings JSON. Lines starting with `//` are comments.
    pub fn from_json_str(contents: &str) -> Result<Self, String> {
        let cleaned: String = contents
            .lines()
            .filter(|line| !line.trim().starts_with("//"))
            .collect::<Vec<_>>()
            .join("\n");

        serde_json::from_str(&cleaned).map_err(|e| e.to_string())
    }

    /// Save current settings to disk
    pub fn save(&self) -> Result<(), String> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;

        fs::write(path, json).map_err(|e| e.to_string())
    }

    /// Number style described by these settings.
    ///
    /// The parser strips whitespace and reads `.` or `,` as the decimal
    /// point, so a non-whitespace group separator or any other decimal
    /// separator would not round-trip. Those fall back to the defaults.
    pub fn number_style(&self) -> NumberStyle {
        let defaults = NumberStyle::default();

        let decimal_separator = if matches!(self.decimal_separator, '.' | ',') {
            self.decimal_separator
        } else {
            log::warn!(
                "Unsupported decimal separator {:?}, using {:?}",
                self.decimal_separator,
                defaults.decimal_separator
            );
            defaults.decimal_separator
        };

        let group_separator = if self.group_separator.is_whitespace() {
            self.group_separator
        } else {
            log::warn!(
                "Group separator must be whitespace, got {:?}; using {:?}",
                self.group_separator,
                defaults.group_separator
            );
            defaults.group_separator
        };

        NumberStyle {
            decimal_separator,
            group_separator,
            min_grouping_digits: self.min_grouping_digits,
            currency: self.currency.trim().to_string(),
        }
    }

    /// A fresh worksheet honoring the seeding and percent defaults.
    pub fn worksheet(&self) -> Worksheet {
        let style = self.number_style();
        let mut sheet = if self.seed_rows {
            Worksheet::seeded(style)
        } else {
            Worksheet::new(style)
        };
        if !self.default_percent.trim().is_empty() {
            sheet.table_mut().set_percent(&self.default_percent);
            sheet.table_mut().drain_events();
        }
        sheet
    }

    /// A fresh wizard honoring the seeding and percent defaults.
    pub fn wizard(&self) -> Wizard {
        let style = self.number_style();
        let mut wizard = if self.seed_rows {
            Wizard::seeded(style)
        } else {
            Wizard::new(style)
        };
        if !self.default_percent.trim().is_empty() {
            wizard.table_mut().set_percent(&self.default_percent);
            wizard.table_mut().drain_events();
        }
        wizard
    }

    /// Create default settings file with comments
    fn create_default_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Error creating config directory: {}", e);
                return;
            }
        }

        let default_config = r#"{
    // Number format: "1 234.56 ₸"
    // For the Russian style use "," and " " with minGroupingDigits 5
    "format.decimalSeparator": ".",
    "format.groupSeparator": " ",
    "format.minGroupingDigits": 4,
    "format.currency": "₸",

    // Calculation
    "calc.defaultPercent": "",
    "calc.seedRows": true
}
"#;

        if let Err(e) = fs::write(path, default_config) {
            log::warn!("Error writing default settings.json: {}", e);
        }
    }
}
