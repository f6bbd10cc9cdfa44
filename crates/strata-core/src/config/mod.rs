//! Configuration types for the Strata admin console.
//!
//! Configuration is loaded from a single YAML file (`strata.yaml`) and then
//! refined by environment variables. Every section is optional; an empty file
//! yields the defaults.
//!
//! # Environment Overrides
//!
//! - `STRATA_BASE_URL`: base URL prepended to every outgoing request
//! - `STRATA_CUSTOM_HEADER_NAME` / `STRATA_CUSTOM_HEADER_VALUE`: header pair
//!   attached to every outgoing request
//! - `STRATA_HIDE_LEGACY_LINKS`: `true`/`1` hides the legacy console links

pub mod console;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use console::ConsoleConfig;
pub use logging::LoggingConfig;
pub use server::ServerConfig;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "STRATA_CONFIG";

/// Complete Strata configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StrataConfig {
    /// HTTP listener for the console itself.
    #[serde(default)]
    pub server: ServerConfig,

    /// Shell construction options (backend URL, header, legacy links).
    #[serde(default)]
    pub console: ConsoleConfig,

    /// Log filter settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl StrataConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML content.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    /// Load configuration the way the binaries do.
    ///
    /// Reads `path` if given, else the file named by `STRATA_CONFIG`, else
    /// starts from defaults. Environment overrides are applied last and the
    /// result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match std::env::var(CONFIG_PATH_ENV) {
                Ok(p) if !p.is_empty() => Self::from_file(p)?,
                _ => Self::default(),
            },
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (normally the process environment).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("STRATA_BASE_URL").filter(|v| !v.is_empty()) {
            self.console.base_url = Some(url);
        }
        if let Some(name) = lookup("STRATA_CUSTOM_HEADER_NAME").filter(|v| !v.is_empty()) {
            self.console.custom_header_name = Some(name);
        }
        if let Some(value) = lookup("STRATA_CUSTOM_HEADER_VALUE") {
            self.console.custom_header_value = Some(value);
        }
        if let Some(flag) = lookup("STRATA_HIDE_LEGACY_LINKS") {
            self.console.hide_legacy_links = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    /// Reject values that would make the console unusable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Config("server.port must be non-zero".to_string()));
        }
        if self.console.intent_reset_delay_ms == 0 {
            return Err(ConfigError::Config(
                "console.intent_reset_delay_ms must be greater than zero".to_string(),
            ));
        }
        if let Some(base_url) = &self.console.base_url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            return Err(ConfigError::Config(format!(
                "console.base_url must be an http(s) URL, got '{}'",
                base_url
            )));
        }
        Ok(())
    }
}
