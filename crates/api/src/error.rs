//! Error types for API client construction.
//!
//! Request failures are not errors at this level: they are recorded in the
//! query's [`QueryState`](kanban_protocol::QueryState) as an
//! [`ErrorInfo`](kanban_protocol::ErrorInfo). The errors here only cover
//! setting up the client.

/// Errors that can occur while building an [`ApiClient`](crate::ApiClient).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The base URL could not be parsed or is not HTTP(S).
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The underlying HTTP client failed to initialize.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized Result type for API client operations.
pub type Result<T> = std::result::Result<T, Error>;
