//! PAI REST Client Implementation

use crate::error::{remote_error, transport_error, Result, SdkError};
use async_trait::async_trait;
use paijob_core::port::{ApiError, ApiResult, ClusterApi};
use paijob_core::{Credentials, JobDescriptor, ServerEndpoint};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use std::time::Duration;
use tracing::debug;
use url::Url;

const JOBS_PATH: &str = "/api/v2/jobs";
const USERS_PATH: &str = "/api/v2/users";

/// Client for the cluster REST API (v2)
///
/// Every request carries the session token as a bearer header when one is
/// known. When the endpoint requires https, plain-http requests are refused.
pub struct PaiRestClient {
    http: reqwest::Client,
    endpoint: ServerEndpoint,
    credentials: Option<Credentials>,
}

impl PaiRestClient {
    /// Create a client bound to `endpoint`
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Resolved REST server base
    /// * `credentials` - Session to authenticate with, if any
    /// * `timeout` - Per-request timeout
    pub fn new(
        endpoint: ServerEndpoint,
        credentials: Option<Credentials>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .https_only(endpoint.https())
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self {
            http,
            endpoint,
            credentials,
        })
    }

    /// `{base}{root}/{segments...}` with each segment percent-encoded
    fn url(&self, root: &str, segments: &[&str]) -> ApiResult<Url> {
        let mut url = self
            .endpoint
            .url(root)
            .map_err(|e| ApiError::Transport(format!("invalid URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("cannot append path to {}", root)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "Cluster API request");
        let builder = self.http.request(method, url);
        match &self.credentials {
            Some(creds) => builder.bearer_auth(&creds.token),
            None => builder,
        }
    }

    /// Send and return the body text of a successful response
    async fn send(&self, builder: RequestBuilder) -> ApiResult<String> {
        let response: Response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            debug!(%status, "Cluster API returned an error");
            return Err(remote_error(status, &body));
        }

        Ok(body)
    }
}

#[async_trait]
impl ClusterApi for PaiRestClient {
    async fn create_job(&self, job: &JobDescriptor) -> ApiResult<serde_json::Value> {
        let yaml = job
            .to_yaml()
            .map_err(|e| ApiError::Decode(format!("cannot serialize job: {}", e)))?;
        let url = self.url(JOBS_PATH, &[])?;

        let body = self
            .send(
                self.request(Method::POST, url)
                    .header(CONTENT_TYPE, "text/yaml")
                    .body(yaml),
            )
            .await?;

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_str(&body).unwrap_or(serde_json::Value::String(body)))
    }

    async fn get_job_config(&self, user: &str, job_name: &str) -> ApiResult<JobDescriptor> {
        let framework = format!("{}~{}", user, job_name);
        let url = self.url(JOBS_PATH, &[&framework, "config"])?;

        let body = self.send(self.request(Method::GET, url)).await?;

        // Served as YAML; JSON bodies parse too
        JobDescriptor::from_yaml(&body)
            .map_err(|e| ApiError::Decode(format!("invalid job config: {}", e)))
    }

    async fn get_user(&self, user: &str) -> ApiResult<serde_json::Value> {
        let url = self.url(USERS_PATH, &[user])?;

        let body = self.send(self.request(Method::GET, url)).await?;

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(format!("invalid user: {}", e)))
    }
}
