// Remote Error Payload & Classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error codes the REST server places in `code`
pub mod codes {
    pub const UNAUTHORIZED_USER: &str = "UnauthorizedUserError";
    pub const NO_JOB_CONFIG: &str = "NoJobConfigError";
}

/// Error payload returned by the REST server for a failed request.
///
/// `code` is `None` when the response body did not carry the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: String,
    #[serde(skip)]
    pub status: Option<u16>,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
            status: None,
        }
    }

    /// Payload for a body that could not be parsed as `{ code, message }`
    pub fn unstructured(status: u16, body: &str) -> Self {
        Self {
            code: None,
            message: format!("{}: {}", status, body.trim()),
            status: Some(status),
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for RemoteError {}

/// Closed set of failure categories the adapter reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifiedError {
    /// Session is no longer valid
    Unauthorized(String),
    /// The server has no job config for the requested job
    NotFound(String),
    Generic(String),
}

impl ClassifiedError {
    pub fn classify(code: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            Some(codes::UNAUTHORIZED_USER) => ClassifiedError::Unauthorized(message),
            Some(codes::NO_JOB_CONFIG) => ClassifiedError::NotFound(message),
            _ => ClassifiedError::Generic(message),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ClassifiedError::Unauthorized(msg)
            | ClassifiedError::NotFound(msg)
            | ClassifiedError::Generic(msg) => msg,
        }
    }
}

impl From<&RemoteError> for ClassifiedError {
    fn from(err: &RemoteError) -> Self {
        ClassifiedError::classify(err.code.as_deref(), err.message.clone())
    }
}
