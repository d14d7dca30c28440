//! Dispatcher configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::ConfigError;

/// Maximum number of autocomplete choices the platform accepts
pub const MAX_AUTOCOMPLETE_CHOICES: usize = 25;

/// Dispatcher configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Reply sent when a guild-only command is used in a direct message
    pub dm_rejection_message: String,
    /// Whether that reply is ephemeral
    pub dm_rejection_ephemeral: bool,
    /// Autocomplete results are truncated to this many choices
    pub autocomplete_choice_limit: usize,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            dm_rejection_message: "This command cannot be used in DMs".to_string(),
            dm_rejection_ephemeral: true,
            autocomplete_choice_limit: MAX_AUTOCOMPLETE_CHOICES,
            log_level: "info".to_string(),
        }
    }
}

impl DispatcherConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("Config file '{}' not found, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => {
                let config: Self =
                    serde_json::from_str(&content).map_err(|e| ConfigError::Parse {
                        message: format!("{} ({})", e, path.display()),
                    })?;
                config.validate()?;
                Ok(config)
            }
            _ => Self::from_toml_str(&content),
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.autocomplete_choice_limit == 0
            || self.autocomplete_choice_limit > MAX_AUTOCOMPLETE_CHOICES
        {
            return Err(ConfigError::Invalid {
                field: "autocomplete_choice_limit".to_string(),
                message: format!("must be between 1 and {}", MAX_AUTOCOMPLETE_CHOICES),
            });
        }
        Ok(())
    }

    /// Merge with another config; non-empty strings in `other` win
    pub fn merge(&mut self, other: DispatcherConfig) {
        if !other.dm_rejection_message.is_empty() {
            self.dm_rejection_message = other.dm_rejection_message;
        }

        self.dm_rejection_ephemeral = other.dm_rejection_ephemeral;

        if other.autocomplete_choice_limit != 0 {
            self.autocomplete_choice_limit = other.autocomplete_choice_limit;
        }

        if !other.log_level.is_empty() {
            self.log_level = other.log_level;
        }
    }
}
