//! Error types for the kanban-protocol crate.
//!
//! This module defines the errors that can occur when decoding protocol
//! values that do not come straight out of serde, such as deadlines given
//! as free-form strings.

use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// A deadline string was neither an integer nor an RFC 3339 timestamp.
    #[error("invalid deadline {input:?}: {reason}")]
    InvalidDeadline {
        /// The rejected input.
        input: String,
        /// Why parsing failed.
        reason: String,
    },

    /// Failed to deserialize a protocol type from JSON.
    #[error("failed to deserialize from JSON: {0}")]
    DeserializationFailed(#[source] serde_json::Error),
}

/// A specialized Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
