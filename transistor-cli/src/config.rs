//! Tool configuration loaded from `transistor.toml`.
//!
//! ```
//! use transistor_cli::config::TransistorConfig;
//!
//! let config = TransistorConfig::from_toml_str(r#"
//!     flags_dir = "defs"
//! "#).unwrap();
//!
//! assert_eq!(config.flags_dir.to_str(), Some("defs"));
//! assert_eq!(config.output_dir.to_str(), Some("src/flags"));
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where flag-set definitions are read and generated enums are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct TransistorConfig {
    /// Directory searched for `<Name>.toml` flag-set definitions.
    pub flags_dir: PathBuf,

    /// Directory generated enum sources are written to.
    pub output_dir: PathBuf,
}

impl Default for TransistorConfig {
    fn default() -> Self {
        Self {
            flags_dir: PathBuf::from("flags"),
            output_dir: PathBuf::from("src/flags"),
        }
    }
}

impl TransistorConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Loads configuration, falling back to defaults when the file is missing.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config not found, using defaults");
            return Ok(Self::default());
        }
        tracing::debug!(path = %path.display(), "loading config");
        Self::load(path)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_default() {
        let config = TransistorConfig::from_toml_str("").unwrap();
        assert_eq!(config, TransistorConfig::default());
    }

    #[test]
    fn overrides_fields() {
        let config = TransistorConfig::from_toml_str(
            r#"
            flags_dir = "definitions"
            output_dir = "generated"
            "#,
        )
        .unwrap();
        assert_eq!(config.flags_dir, PathBuf::from("definitions"));
        assert_eq!(config.output_dir, PathBuf::from("generated"));
    }

    #[test]
    fn rejects_unknown_keys() {
        let result = TransistorConfig::from_toml_str("flag_dir = \"typo\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_file_is_default() {
        let config = TransistorConfig::load_or_default("does/not/exist/transistor.toml").unwrap();
        assert_eq!(config, TransistorConfig::default());
    }
}
