//! Reader configuration.
//!
//! An optional `config.toml` in the site root sets the initial display state,
//! the two illustrative image variants and the chapter-load policy. The file is
//! sparse: stock defaults are serialized to TOML, the user file is merged on
//! top, and the result is deserialized and validated.
//!
//! ```toml
//! [display]
//! divine_name = "LORD"
//! divine_name_choices = ["LORD", "Yahweh", "Jehovah", "YHWH"]
//! pronoun_emphasis = false
//! alternate_image = false
//!
//! [images]
//! default = "images/temp.jpg"
//! alternate = "images/vibe.png"
//!
//! [loading]
//! discard_stale = true
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderConfig {
    pub display: DisplayConfig,
    pub images: ImagesConfig,
    pub loading: LoadingConfig,
}

impl ReaderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.images.default.trim().is_empty() || self.images.alternate.trim().is_empty() {
            return Err(ConfigError::Validation(
                "images.default and images.alternate must not be empty".into(),
            ));
        }
        if self.display.divine_name_choices.is_empty() {
            return Err(ConfigError::Validation(
                "display.divine_name_choices must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Initial state of the display toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Rendering of the divine name. Any text is accepted.
    pub divine_name: String,
    /// Renderings offered by the divine-name control.
    pub divine_name_choices: Vec<String>,
    /// Capitalize reverential pronouns (He, Him, His).
    pub pronoun_emphasis: bool,
    /// Show the alternate illustrative image.
    pub alternate_image: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            divine_name: "LORD".to_string(),
            divine_name_choices: ["LORD", "Yahweh", "Jehovah", "YHWH"]
                .into_iter()
                .map(String::from)
                .collect(),
            pronoun_emphasis: false,
            alternate_image: false,
        }
    }
}

/// Site-relative sources of the two illustrative image variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImagesConfig {
    pub default: String,
    pub alternate: String,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            default: "images/temp.jpg".to_string(),
            alternate: "images/vibe.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadingConfig {
    /// Drop the result of a chapter load that was superseded by a newer one.
    /// When false, whichever load finishes last wins.
    pub discard_stale: bool,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            discard_stale: true,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ReaderConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Parse a config file body on top of the stock defaults.
pub fn parse_config(content: &str) -> Result<ReaderConfig, ConfigError> {
    let overlay: toml::Value = toml::from_str(content)?;
    let merged = merge_toml(stock_defaults_value()?, overlay);
    let config: ReaderConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `config.toml` from the site root, falling back to defaults when the
/// file does not exist.
pub fn load_config(site: &Path) -> Result<ReaderConfig, ConfigError> {
    let path = site.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(ReaderConfig::default());
    }
    let content = fs::read_to_string(&path)?;
    parse_config(&content)
}

/// A fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Scripture Reader Configuration
# ==============================
# Place this file as config.toml in the site root (next to data/).
# Every key is optional; omitted keys keep the values shown here.

[display]
# Text shown for every divine-name token. Any string is accepted.
divine_name = "LORD"
# Renderings offered by the divine-name control.
divine_name_choices = ["LORD", "Yahweh", "Jehovah", "YHWH"]
# Capitalize reverential pronouns (He, Him, His).
pronoun_emphasis = false
# Show the alternate illustrative image.
alternate_image = false

[images]
# Site-relative image sources for the two variants.
default = "images/temp.jpg"
alternate = "images/vibe.png"

[loading]
# Ignore a chapter that finishes loading after a newer request was made.
# Set to false to let whichever load finishes last win.
discard_stale = true
"##
}
