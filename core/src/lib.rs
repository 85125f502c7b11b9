//! keyboard-text-core
//!
//! Text model of a virtual keyboard input session: the preedit being composed,
//! the surrounding text reported by the host text field, and the cursor offset
//! into that surrounding text.
//!
//! Public API:
//! - `TextState` - Preedit and surrounding text with bounded, clamped mutation
//! - `PreeditFace` - Display hint for the preedit
//! - `Config` - Configuration (surrounding text limit)
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub mod text;
pub use text::{PreeditFace, TextState};

/// Default number of surrounding characters a `TextState` retains.
pub const DEFAULT_MAX_SURROUNDING_TEXT_LENGTH: usize = 1000;

/// Configuration for keyboard text sessions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Maximum characters of surrounding text kept per session.
    /// Longer text reported by the host is truncated from the tail.
    pub max_surrounding_text_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_surrounding_text_length: DEFAULT_MAX_SURROUNDING_TEXT_LENGTH,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check that the configured values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_surrounding_text_length == 0 {
            bail!("max_surrounding_text_length must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.max_surrounding_text_length, DEFAULT_MAX_SURROUNDING_TEXT_LENGTH);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_toml() {
        let config = Config::from_toml_str("max_surrounding_text_length = 64").unwrap();
        assert_eq!(config.max_surrounding_text_length, 64);

        let text = TextState::with_config(&config);
        assert_eq!(text.max_surrounding_len(), 64);
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_rejects_zero_limit() {
        assert!(Config::from_toml_str("max_surrounding_text_length = 0").is_err());
    }

    #[test]
    fn test_config_toml_file() {
        let path = std::env::temp_dir().join(format!(
            "keyboard-text-core-config-{}.toml",
            std::process::id()
        ));
        let config = Config {
            max_surrounding_text_length: 250,
        };

        config.save_toml(&path).unwrap();
        let loaded = Config::load_toml(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let err = Config::load_toml("/nonexistent/keyboard.toml").unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/keyboard.toml"));
    }
}
