//! Core configuration struct and loading logic.
//!
//! This module provides the main [`Config`] struct which aggregates all
//! configuration options for the kanban viewer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::api::ApiConfig;
use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_URL_ENV: &str = "KANBAN_API_URL";

/// Environment variable overriding [`ApiConfig::timeout_secs`].
pub const API_TIMEOUT_ENV: &str = "KANBAN_API_TIMEOUT_SECS";

/// The main configuration struct for the kanban viewer.
///
/// # Examples
///
/// ```
/// use kanban_config::{ApiConfig, Config};
///
/// // Create a default config
/// let config = Config::default();
/// assert_eq!(config.api.base_url, "http://localhost:8080/api");
///
/// // Create a custom config
/// let config = Config {
///     api: ApiConfig::with_base_url("https://kanban.example.com/api"),
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Board API connection settings.
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Creates a new default configuration.
    ///
    /// This is equivalent to `Config::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations, then applies
    /// environment overrides.
    ///
    /// Searches for configuration files in the following order:
    ///
    /// 1. Local: `./kanban.json5` or `./kanban.json`
    /// 2. User: `~/.config/kanban/config.json5` or `~/.config/kanban/config.json`
    ///
    /// If no configuration file is found, starts from the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if the resulting configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kanban_config::Config;
    ///
    /// # fn example() -> kanban_config::Result<()> {
    /// let config = Config::load()?;
    /// println!("Talking to {}", config.api.base_url);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let config = Self::read()?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but leaves validation to the caller.
    ///
    /// Use this when further overrides are layered on top, so that only the
    /// final values are checked.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read or parsed, or if an environment override is malformed.
    pub fn read() -> Result<Self> {
        let mut config = match find_config_file() {
            Some(path) => read_config_file(&path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Loads configuration from a specific file, then applies environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration is invalid.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use kanban_config::Config;
    ///
    /// # fn example() -> kanban_config::Result<()> {
    /// let config = Config::load_from("custom-config.json5")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load_from`], without validation.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an
    /// environment override is malformed.
    pub fn read_from(path: impl AsRef<Path>) -> Result<Self> {
        let mut config: Config = read_config_file(path)?;
        config.apply_env()?;
        Ok(config)
    }

    /// Saves the configuration to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Applies overrides from the process environment.
    ///
    /// `KANBAN_API_URL` replaces the base URL and `KANBAN_API_TIMEOUT_SECS`
    /// the request timeout. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTimeout`] if the timeout variable is
    /// not a number.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|name| std::env::var(name).ok())
    }

    /// Applies overrides read through `lookup` instead of the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`Config::apply_env`].
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_config::Config;
    ///
    /// let mut config = Config::default();
    /// config
    ///     .apply_env_from(|name| (name == "KANBAN_API_URL").then(|| "http://api.test".to_string()))
    ///     .unwrap();
    /// assert_eq!(config.api.base_url, "http://api.test");
    /// ```
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }

        if let Some(raw) = lookup(API_TIMEOUT_ENV).filter(|v| !v.trim().is_empty()) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidTimeout {
                    reason: format!("{API_TIMEOUT_ENV}={raw:?}: {e}"),
                })?;
            self.api.timeout_secs = Some(secs);
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any section is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_config::{ApiConfig, Config};
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.api = ApiConfig::with_base_url("localhost:8080");
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        self.api.validate()
    }
}
