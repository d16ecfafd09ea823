//! Error types for ragchat.

use std::io;
use thiserror::Error;

/// Result type alias for ragchat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ragchat operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Storage I/O error.
    #[error("Storage error: {0}")]
    Storage(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// HTTP transport error (connect, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Remote endpoint returned a non-success status.
    #[error("Endpoint error ({status}): {message}")]
    Endpoint {
        /// HTTP status code.
        status: u16,

        /// Error body or status text from the endpoint.
        message: String,
    },

    /// Remote response was well-formed HTTP but not the expected shape.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}
