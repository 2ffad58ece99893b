//! Configuration file parser for ~/.config/newsstand/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields`
//! off).
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds maximum allowed size.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level application configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be
/// specified. Missing keys fall back to `Default::default()`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme variant name ("dark" or "light").
    pub theme: String,

    /// Custom keybinding overrides. Keys are action names, values are key strings.
    pub keybindings: HashMap<String, String>,

    /// Page document path override. When unset, the page imported into the
    /// config directory is used.
    pub page_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            keybindings: HashMap::new(),
            page_path: None,
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior)
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        // Check file size before reading to bound memory use on a
        // corrupted config file.
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let raw = std::fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&raw)?;
        tracing::debug!(path = %path.display(), theme = %config.theme, "Loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "dark");
        assert!(config.keybindings.is_empty());
        assert!(config.page_path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            theme = "light"
            page_path = "/tmp/page.json"

            [keybindings]
            quit = "x"
            show_all = "0"
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.theme, "light");
        assert_eq!(config.page_path, Some(PathBuf::from("/tmp/page.json")));
        assert_eq!(config.keybindings.get("quit").unwrap(), "x");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str("theme = \"light\"").unwrap();
        assert_eq!(config.theme, "light");
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config: Config =
            toml::from_str("theme = \"dark\"\nrefresh_interval = 5").unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.theme, "dark");
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = toml::from_str::<Config>("theme = [broken").unwrap_err();
        // Parse errors carry position info for the user.
        assert!(err.to_string().contains("TOML") || !err.to_string().is_empty());
    }
}
