use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Config;

/// Environment variable that overrides `sheet.token`.
pub const TOKEN_ENV_VAR: &str = "HANZI_QUIZ_TOKEN";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/hanzi-quiz/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("hanzi-quiz").join("config.toml")
    }

    /// Loads configuration from the default config file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads configuration from `path`.
    ///
    /// - If the file doesn't exist, starts from `Config::default()`.
    /// - `HANZI_QUIZ_TOKEN` replaces the token from the file when set.
    /// - Validation is left to the caller so CLI overrides can be applied first.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })?;

            toml::from_str::<Config>(&content).map_err(|e| ConfigError::ParseError {
                path: path.to_path_buf(),
                source: e,
            })?
        } else {
            Config::default()
        };

        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                config.sheet.token = Some(token);
            }
        }

        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - A spreadsheet id is set
    /// - The auth type is known and has a token or key file
    /// - Column names are non-empty and distinct after normalization
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sheet.id.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "sheet.id must be set".to_string(),
            });
        }

        let auth = self.sheet.auth_type_str.trim().to_lowercase();
        if !["bearer", "api_key", "service_account"].contains(&auth.as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Unknown sheet.auth_type '{}' (expected \"bearer\", \"api_key\" or \"service_account\")",
                    self.sheet.auth_type_str
                ),
            });
        }

        if !self.sheet.is_configured() {
            let message = if auth == "service_account" {
                "sheet.key_file is not set".to_string()
            } else {
                format!("sheet.token is not set (or export {})", TOKEN_ENV_VAR)
            };
            return Err(ConfigError::ValidationError { message });
        }

        let mut seen: Vec<String> = Vec::new();
        for name in self.columns.required() {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(ConfigError::ValidationError {
                    message: "Column names must not be empty".to_string(),
                });
            }
            if seen.contains(&normalized) {
                return Err(ConfigError::ValidationError {
                    message: format!("Column '{}' is configured twice", normalized),
                });
            }
            seen.push(normalized);
        }

        Ok(())
    }
}
