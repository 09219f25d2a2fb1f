//! Board API connection settings.
//!
//! This module provides the [`ApiConfig`] type: where the board API lives
//! and how long a request may take.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Minimum allowed request timeout (1 second).
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Maximum allowed request timeout (5 minutes).
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Connection settings for the board API.
///
/// # Examples
///
/// ```
/// use kanban_config::ApiConfig;
///
/// // Default configuration
/// let config = ApiConfig::default();
/// assert_eq!(config.base_url, "http://localhost:8080/api");
/// assert!(config.timeout().is_none());
///
/// // Custom base URL
/// let config = ApiConfig::with_base_url("https://kanban.example.com/api");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    ///
    /// When unset, requests use the HTTP client's defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl ApiConfig {
    /// Creates a configuration pointing at `base_url`, with no timeout.
    ///
    /// # Examples
    ///
    /// ```
    /// use kanban_config::ApiConfig;
    ///
    /// let config = ApiConfig::with_base_url("http://127.0.0.1:3000/api");
    /// assert_eq!(config.base_url, "http://127.0.0.1:3000/api");
    /// assert!(config.timeout_secs.is_none());
    /// ```
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: None,
        }
    }

    /// Returns the request timeout, if one is configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use kanban_config::ApiConfig;
    ///
    /// let config = ApiConfig {
    ///     timeout_secs: Some(10),
    ///     ..ApiConfig::default()
    /// };
    /// assert_eq!(config.timeout(), Some(Duration::from_secs(10)));
    /// ```
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Validates the API settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if the base URL is empty or
    /// not HTTP(S), and [`ConfigError::InvalidTimeout`] if the timeout is
    /// outside the allowed range.
    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "must not be empty".to_string(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "must start with http:// or https://".to_string(),
            });
        }

        if let Some(secs) = self.timeout_secs {
            if secs < MIN_TIMEOUT_SECS {
                return Err(ConfigError::InvalidTimeout {
                    reason: format!(
                        "timeout {secs} is below minimum of {MIN_TIMEOUT_SECS} seconds"
                    ),
                });
            }
            if secs > MAX_TIMEOUT_SECS {
                return Err(ConfigError::InvalidTimeout {
                    reason: format!("timeout {secs} exceeds maximum of {MAX_TIMEOUT_SECS} seconds"),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.timeout_secs.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn with_base_url() {
        let config = ApiConfig::with_base_url("https://example.com/api");
        assert_eq!(config.base_url, "https://example.com/api");
        assert!(config.timeout().is_none());
    }

    #[test]
    fn validate_rejects_empty_url() {
        let config = ApiConfig::with_base_url("  ");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn validate_rejects_non_http_url() {
        for url in ["localhost:8080/api", "ftp://example.com", "/api"] {
            let config = ApiConfig::with_base_url(url);
            assert!(config.validate().is_err(), "{url}");
        }
    }

    #[test]
    fn validate_timeout_bounds() {
        let at = |secs| ApiConfig {
            timeout_secs: Some(secs),
            ..ApiConfig::default()
        };
        assert!(at(0).validate().is_err());
        assert!(at(MIN_TIMEOUT_SECS).validate().is_ok());
        assert!(at(MAX_TIMEOUT_SECS).validate().is_ok());
        assert!(at(MAX_TIMEOUT_SECS + 1).validate().is_err());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ApiConfig::default());
    }

    #[test]
    fn deserialize_partial() {
        let config: ApiConfig = serde_json::from_str(r#"{"timeout_secs": 30}"#).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn timeout_not_serialized_when_none() {
        let json = serde_json::to_string(&ApiConfig::default()).unwrap();
        assert!(!json.contains("timeout_secs"));
    }
}
