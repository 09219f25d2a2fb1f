//! Configuration management for the kanban viewer.
//!
//! This crate handles loading, validating, and persisting configuration
//! from multiple sources (files, environment variables, defaults).
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`api`]: Board API connection settings
//! - [`persistence`]: Config file reading and writing
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from multiple sources with the following priority
//! (highest to lowest):
//!
//! 1. Command-line flags (applied by the binary)
//! 2. Environment variables (`KANBAN_API_URL`, `KANBAN_API_TIMEOUT_SECS`)
//! 3. Local config (`./kanban.json5` or `./kanban.json`)
//! 4. User config (`~/.config/kanban/config.json5` or `~/.config/kanban/config.json`)
//! 5. Built-in defaults
//!
//! # File Format
//!
//! ```json5
//! {
//!   api: {
//!     // Everything is requested relative to this URL.
//!     base_url: "http://localhost:8080/api",
//!     timeout_secs: 10,
//!   },
//! }
//! ```
//!
//! # Examples
//!
//! ```no_run
//! use kanban_config::Config;
//!
//! # fn example() -> kanban_config::Result<()> {
//! let config = Config::load()?;
//! println!("API at {}", config.api.base_url);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod persistence;

// Re-export primary types at crate root for convenience
pub use api::ApiConfig;
pub use config::{API_TIMEOUT_ENV, API_URL_ENV, Config};
pub use error::{ConfigError, Result};
