//! Raw JSON fetch, independent of the REST client's session wiring

use crate::error::{remote_error, transport_error, Result, SdkError};
use async_trait::async_trait;
use paijob_core::port::{ApiError, ApiResult, HttpFetch};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// `HttpFetch` over a plain `reqwest::Client`
pub struct ReqwestFetch {
    http: reqwest::Client,
}

impl ReqwestFetch {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SdkError::Connection(format!("Failed to create client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetch {
    async fn get_json(&self, url: Url, bearer: Option<String>) -> ApiResult<serde_json::Value> {
        debug!(%url, "GET");
        let mut builder = self.http.get(url);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(remote_error(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
