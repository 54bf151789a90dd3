// Central Error Type for the Adapter

use crate::port::StoreError;
use thiserror::Error;

/// Adapter-level error type
///
/// `NotFound` and `Generic` carry the server-supplied message verbatim, so
/// their `Display` output is exactly what the server said.
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Generic(String),

    #[error("Invalid job description: {0}")]
    InvalidJob(#[from] serde_yaml::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Credential store error: {0}")]
    Store(#[from] StoreError),
}

impl AdapterError {
    /// True when the server reported that the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, AdapterError::NotFound(_))
    }
}

impl From<url::ParseError> for AdapterError {
    fn from(err: url::ParseError) -> Self {
        AdapterError::Config(format!("invalid URL: {}", err))
    }
}

/// Result type alias using AdapterError
pub type Result<T> = std::result::Result<T, AdapterError>;
