//! Error types for the resort map client

use thiserror::Error;

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the hotel API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The API answered with a non-success status
    #[error("API {status}: {body}")]
    Status { status: u16, body: String },

    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL or path could not form a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// The load was abandoned before it finished
    #[error("Load cancelled")]
    Cancelled,

    /// Background task ended abnormally
    #[error("Task error: {0}")]
    Task(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the API reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }

    /// HTTP status reported by the API, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
