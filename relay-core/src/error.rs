//! Error types for the relay

use thiserror::Error;

/// Relay-wide error type
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Symbol source error ({source_name}): {message}")]
    Source {
        source_name: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    pub fn api(msg: impl Into<String>) -> Self {
        RelayError::Api(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        RelayError::Network(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        RelayError::Parse(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        RelayError::NotFound(msg.into())
    }

    pub fn source(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        RelayError::Source {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        RelayError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        RelayError::Internal(msg.into())
    }
}

/// Result type alias for relay operations
pub type RelayResult<T> = Result<T, RelayError>;
