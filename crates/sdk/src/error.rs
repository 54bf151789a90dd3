//! SDK Error Types

use paijob_core::port::ApiError;
use paijob_core::RemoteError;
use reqwest::StatusCode;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors raised while setting up a client
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Connection error: {0}")]
    Connection(String),
}

// reqwest::Error -> ApiError lives here as a helper because neither type is
// local to this crate (orphan rule)
pub(crate) fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_decode() {
        ApiError::Decode(err.to_string())
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Build the remote error for a non-success response body
pub(crate) fn remote_error(status: StatusCode, body: &str) -> ApiError {
    let remote = match serde_json::from_str::<RemoteError>(body) {
        Ok(parsed) if parsed.code.is_some() => parsed.with_status(status.as_u16()),
        _ => RemoteError::unstructured(status.as_u16(), body),
    };
    ApiError::Remote(remote)
}
