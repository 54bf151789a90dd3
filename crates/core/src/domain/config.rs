// Portal Configuration & Server Endpoint

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Scheduler identifier that enables SKU-type lookups
pub const HIVED_SCHEDULER: &str = "hivedscheduler";

/// Path of the SKU-type endpoint, relative to the REST server base
pub const SKU_TYPES_PATH: &str = "/api/v2/cluster/sku-types";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Scheduler the cluster is running
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LauncherScheduler {
    Hived,
    Other(String),
}

impl LauncherScheduler {
    pub fn is_hived(&self) -> bool {
        matches!(self, LauncherScheduler::Hived)
    }

    pub fn as_str(&self) -> &str {
        match self {
            LauncherScheduler::Hived => HIVED_SCHEDULER,
            LauncherScheduler::Other(name) => name,
        }
    }
}

impl Default for LauncherScheduler {
    fn default() -> Self {
        LauncherScheduler::Other("k8s".to_string())
    }
}

impl From<String> for LauncherScheduler {
    fn from(s: String) -> Self {
        if s == HIVED_SCHEDULER {
            LauncherScheduler::Hived
        } else {
            LauncherScheduler::Other(s)
        }
    }
}

impl From<&str> for LauncherScheduler {
    fn from(s: &str) -> Self {
        LauncherScheduler::from(s.to_string())
    }
}

impl From<LauncherScheduler> for String {
    fn from(s: LauncherScheduler) -> Self {
        s.as_str().to_string()
    }
}

impl std::fmt::Display for LauncherScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a REST server endpoint could not be resolved
#[derive(Debug, Error)]
pub enum EndpointError {
    #[error("no REST server configured (set rest_server_uri)")]
    Missing,

    #[error("invalid REST server URI: {0}")]
    Parse(#[from] url::ParseError),

    /// Portal is served over https but the REST server is plain http
    #[error("REST server {0} is plain http but the portal requires https")]
    InsecureBase(Url),
}

/// Settings read once at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortalConfig {
    /// REST server URI, absolute or relative to `webportal_url`
    #[serde(default)]
    pub rest_server_uri: String,

    #[serde(default)]
    pub launcher_scheduler: LauncherScheduler,

    /// Address the portal is served from
    #[serde(default)]
    pub webportal_url: Option<String>,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Where the session (user + token) is persisted
    #[serde(default)]
    pub session_file: Option<String>,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl PortalConfig {
    pub fn new(rest_server_uri: impl Into<String>) -> Self {
        Self {
            rest_server_uri: rest_server_uri.into(),
            launcher_scheduler: LauncherScheduler::default(),
            webportal_url: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_file: None,
        }
    }

    pub fn endpoint(&self) -> Result<ServerEndpoint, EndpointError> {
        ServerEndpoint::resolve(&self.rest_server_uri, self.webportal_url.as_deref())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Absolute REST server base plus the transport it must be reached over
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerEndpoint {
    base: Url,
    https: bool,
}

impl ServerEndpoint {
    /// Resolve `rest_server_uri` against the portal address.
    ///
    /// `https` follows the portal's scheme when one is known, otherwise the
    /// REST URI's own scheme. An https portal cannot use a plain-http base.
    pub fn resolve(
        rest_server_uri: &str,
        webportal_url: Option<&str>,
    ) -> Result<Self, EndpointError> {
        if rest_server_uri.trim().is_empty() {
            return Err(EndpointError::Missing);
        }

        let (base, https) = match webportal_url {
            Some(portal) => {
                let portal = Url::parse(portal)?;
                let base = portal.join(rest_server_uri)?;
                (base, portal.scheme() == "https")
            }
            None => {
                let base = Url::parse(rest_server_uri)?;
                let https = base.scheme() == "https";
                (base, https)
            }
        };

        if https && base.scheme() != "https" {
            return Err(EndpointError::InsecureBase(base));
        }

        Ok(Self { base, https })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn https(&self) -> bool {
        self.https
    }

    /// Join `path` onto the base with exactly one `/` between them
    pub fn join(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn url(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.join(path))
    }

    /// `{base}/api/v2/cluster/sku-types?vc={virtual_cluster}`
    pub fn sku_types_url(&self, virtual_cluster: &str) -> Result<Url, url::ParseError> {
        let mut url = self.url(SKU_TYPES_PATH)?;
        url.query_pairs_mut().append_pair("vc", virtual_cluster);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_from_string() {
        assert_eq!(LauncherScheduler::from("hivedscheduler"), LauncherScheduler::Hived);
        assert_eq!(
            LauncherScheduler::from("yarn"),
            LauncherScheduler::Other("yarn".to_string())
        );
        assert!(!LauncherScheduler::from("HivedScheduler").is_hived());
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: PortalConfig =
            serde_json::from_str(r#"{"rest_server_uri":"http://10.0.0.1:9186"}"#).unwrap();

        assert_eq!(config.launcher_scheduler, LauncherScheduler::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.webportal_url.is_none());
    }

    #[test]
    fn test_config_deserialize_hived() {
        let config: PortalConfig = serde_json::from_str(
            r#"{"rest_server_uri":"/rest-server","launcher_scheduler":"hivedscheduler"}"#,
        )
        .unwrap();

        assert!(config.launcher_scheduler.is_hived());
    }

    #[test]
    fn test_resolve_absolute_uri() {
        let endpoint = ServerEndpoint::resolve("http://10.0.0.1:9186", None).unwrap();
        assert_eq!(endpoint.join("/api/v2/jobs"), "http://10.0.0.1:9186/api/v2/jobs");
        assert!(!endpoint.https());
    }

    #[test]
    fn test_resolve_relative_uri_against_portal() {
        let endpoint =
            ServerEndpoint::resolve("/rest-server", Some("https://pai.example.com/job-submit.html"))
                .unwrap();

        assert_eq!(endpoint.base().as_str(), "https://pai.example.com/rest-server");
        assert!(endpoint.https());
    }

    #[test]
    fn test_absolute_uri_wins_over_portal() {
        let endpoint =
            ServerEndpoint::resolve("http://rest:9186/", Some("http://pai.example.com/")).unwrap();

        assert_eq!(endpoint.base().as_str(), "http://rest:9186/");
        assert!(!endpoint.https());
    }

    #[test]
    fn test_https_portal_rejects_plain_http_base() {
        let err = ServerEndpoint::resolve("http://rest:9186/", Some("https://pai.example.com/"))
            .unwrap_err();

        assert!(
            matches!(err, EndpointError::InsecureBase(ref url) if url.as_str() == "http://rest:9186/")
        );
        assert!(err.to_string().contains("requires https"));
    }

    #[test]
    fn test_https_portal_accepts_https_base() {
        let endpoint =
            ServerEndpoint::resolve("https://rest:9186/", Some("https://pai.example.com/"))
                .unwrap();

        assert!(endpoint.https());
    }

    #[test]
    fn test_empty_uri_is_missing() {
        let config = PortalConfig::new("");
        assert!(matches!(config.endpoint(), Err(EndpointError::Missing)));
    }

    #[test]
    fn test_config_without_server_deserializes() {
        let config: PortalConfig =
            serde_json::from_str(r#"{"session_file":"/tmp/s.json"}"#).unwrap();
        assert!(config.rest_server_uri.is_empty());
    }

    #[test]
    fn test_relative_uri_without_portal_fails() {
        assert!(matches!(
            ServerEndpoint::resolve("/rest-server", None),
            Err(EndpointError::Parse(_))
        ));
    }

    #[test]
    fn test_join_normalizes_slashes() {
        let endpoint = ServerEndpoint::resolve("http://host/rest-server/", None).unwrap();
        assert_eq!(endpoint.join("api/v2/users/a"), "http://host/rest-server/api/v2/users/a");
        assert_eq!(endpoint.join("/api/v2/users/a"), "http://host/rest-server/api/v2/users/a");
    }

    #[test]
    fn test_sku_types_url() {
        let endpoint = ServerEndpoint::resolve("http://10.0.0.1:9186", None).unwrap();
        let url = endpoint.sku_types_url("vc1").unwrap();
        assert_eq!(url.as_str(), "http://10.0.0.1:9186/api/v2/cluster/sku-types?vc=vc1");
    }

    #[test]
    fn test_sku_types_url_encodes_query() {
        let endpoint = ServerEndpoint::resolve("http://host", None).unwrap();
        let url = endpoint.sku_types_url("a&b").unwrap();
        assert_eq!(url.as_str(), "http://host/api/v2/cluster/sku-types?vc=a%26b");
    }
}
