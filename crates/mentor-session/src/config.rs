//! Configuration for the session core.
//!
//! Settings load from `mentor.json` in the working directory. A missing
//! file yields defaults; a present but malformed file is an error, never
//! silently ignored.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// The default config file name.
const CONFIG_FILE_NAME: &str = "mentor.json";

/// Default base address of the mentor service.
fn default_api_url() -> String {
    "http://localhost:8000".to_string()
}

/// Default per-request timeout in seconds.
const fn default_request_timeout() -> u64 {
    30
}

/// Default maximum hint length in characters.
const fn default_hint_max_length() -> usize {
    240
}

/// Main configuration for the session core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base address of the remote mentor service.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Maximum length of a stored hint, in characters.
    #[serde(default = "default_hint_max_length")]
    pub hint_max_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            request_timeout: default_request_timeout(),
            hint_max_length: default_hint_max_length(),
        }
    }
}

impl Config {
    /// Loads configuration from the current working directory.
    ///
    /// Looks for `mentor.json` in the current directory. If found, loads and
    /// validates the configuration. If not found, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            SessionError::config_parse(
                "<current directory>",
                format!("cannot determine current directory: {e}"),
            )
        })?;
        Self::load_from_dir(&current_dir)
    }

    /// Loads configuration from a specific directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but contains invalid JSON.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        Self::load_from_file(&config_path)
    }

    /// Loads configuration from a specific file path.
    ///
    /// If the file does not exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ConfigParseError` if the file exists but
    /// contains invalid JSON, and `SessionError::ConfigValidationError` if
    /// the values are invalid (zero timeout, empty URL).
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(e) => {
                return Err(SessionError::config_parse(
                    path,
                    format!("failed to read file: {e}"),
                ));
            }
        };

        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| SessionError::config_parse(path, e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::ConfigValidationError` if any check fails.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(SessionError::config_validation(
                "apiUrl must not be empty",
                "Set apiUrl to the mentor service address in your mentor.json",
            ));
        }

        if self.request_timeout == 0 {
            return Err(SessionError::config_validation(
                "requestTimeout must be greater than 0",
                "Set requestTimeout to at least 1 second in your mentor.json",
            ));
        }

        if self.hint_max_length == 0 {
            return Err(SessionError::config_validation(
                "hintMaxLength must be greater than 0",
                "Set hintMaxLength to at least 1 character in your mentor.json",
            ));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
