// Cluster API Port (Interface)

use crate::domain::{ClassifiedError, JobDescriptor, RemoteError};
use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a cluster API call
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with an error payload
    #[error("{0}")]
    Remote(RemoteError),

    /// No usable response (connect failure, timeout, TLS)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered successfully with a body we could not read
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ApiError {
    /// Classify at the boundary where the failure is received.
    ///
    /// Only server payloads carry a code; every other failure is generic.
    pub fn classify(&self) -> ClassifiedError {
        match self {
            ApiError::Remote(remote) => ClassifiedError::from(remote),
            other => ClassifiedError::Generic(other.to_string()),
        }
    }
}

impl From<RemoteError> for ApiError {
    fn from(err: RemoteError) -> Self {
        ApiError::Remote(err)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// REST operations the adapter needs from the cluster
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClusterApi: Send + Sync {
    /// Submit a new job
    async fn create_job(&self, job: &JobDescriptor) -> ApiResult<serde_json::Value>;

    /// Fetch the protocol a job was submitted with
    async fn get_job_config(&self, user: &str, job_name: &str) -> ApiResult<JobDescriptor>;

    /// Fetch a user profile
    async fn get_user(&self, user: &str) -> ApiResult<serde_json::Value>;
}
