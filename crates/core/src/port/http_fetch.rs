// Raw HTTP Port
//
// Used for endpoints the cluster API client does not cover. Callers build
// the URL and supply the bearer token themselves.

use crate::port::ApiResult;
use async_trait::async_trait;
use url::Url;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and parse the body as JSON
    async fn get_json(&self, url: Url, bearer: Option<String>) -> ApiResult<serde_json::Value>;
}
