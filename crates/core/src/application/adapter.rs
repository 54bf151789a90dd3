// Job Client Adapter - the four cluster operations and their error handling

use crate::domain::{
    ClassifiedError, Credentials, JobDescriptor, LauncherScheduler, Outcome, ServerEndpoint,
};
use crate::error::{AdapterError, Result};
use crate::port::{ApiResult, ClusterApi, CredentialStore, HttpFetch, Notifier};
use serde_json::{Map, Value};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Adapter between callers and the cluster REST service.
///
/// Built once with the session captured at startup; every field is
/// read-only afterwards, so one adapter can serve concurrent calls.
pub struct JobClientAdapter {
    api: Arc<dyn ClusterApi>,
    http: Arc<dyn HttpFetch>,
    store: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    endpoint: ServerEndpoint,
    scheduler: LauncherScheduler,
    credentials: Option<Credentials>,
}

impl JobClientAdapter {
    pub fn new(
        api: Arc<dyn ClusterApi>,
        http: Arc<dyn HttpFetch>,
        store: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        endpoint: ServerEndpoint,
        scheduler: LauncherScheduler,
        credentials: Option<Credentials>,
    ) -> Self {
        Self {
            api,
            http,
            store,
            notifier,
            endpoint,
            scheduler,
            credentials,
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Run `action` and normalize its failure.
    ///
    /// * `UnauthorizedUserError` - alert the user, clear the stored session,
    ///   return `Outcome::ReauthRequired`
    /// * `NoJobConfigError` - `AdapterError::NotFound`
    /// * anything else - `AdapterError::Generic`
    pub async fn guard<T, F, Fut>(&self, action: F) -> Result<Outcome<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<T>>,
    {
        let err = match action().await {
            Ok(value) => return Ok(Outcome::Completed(value)),
            Err(err) => err,
        };

        match err.classify() {
            ClassifiedError::Unauthorized(message) => {
                warn!(message = %message, "Session rejected by server, clearing credentials");
                self.notifier.alert(&message);
                if let Err(e) = self.store.clear() {
                    warn!(error = %e, "Failed to clear stored credentials");
                }
                Ok(Outcome::ReauthRequired)
            }
            ClassifiedError::NotFound(message) => Err(AdapterError::NotFound(message)),
            ClassifiedError::Generic(message) => Err(AdapterError::Generic(message)),
        }
    }

    /// Parse `job_text` as YAML and submit it
    pub async fn submit_job(&self, job_text: &str) -> Result<Outcome<Value>> {
        let job = JobDescriptor::from_yaml(job_text)?;
        info!(job_name = job.name().unwrap_or("<unnamed>"), "Submitting job");

        self.guard(|| self.api.create_job(&job)).await
    }

    /// Protocol `job_name` of `user_name` was submitted with
    pub async fn fetch_job_config(
        &self,
        user_name: &str,
        job_name: &str,
    ) -> Result<Outcome<JobDescriptor>> {
        debug!(user = user_name, job = job_name, "Fetching job config");

        self.guard(|| self.api.get_job_config(user_name, job_name)).await
    }

    /// Virtual clusters `user` may submit to; empty when the profile has none
    pub async fn list_user_virtual_clusters(&self, user: &str) -> Result<Outcome<Vec<String>>> {
        debug!(user, "Listing virtual clusters");

        let outcome = self.guard(|| self.api.get_user(user)).await?;
        Ok(outcome.map(|profile| virtual_clusters_of(&profile)))
    }

    /// SKU types available in `virtual_cluster`.
    ///
    /// Only the hived scheduler has SKU types; for any other scheduler the
    /// result is empty and no request is made.
    pub async fn list_hived_sku_types(
        &self,
        virtual_cluster: &str,
    ) -> Result<Outcome<Map<String, Value>>> {
        if !self.scheduler.is_hived() {
            debug!(scheduler = %self.scheduler, "Scheduler has no SKU types");
            return Ok(Outcome::Completed(Map::new()));
        }

        let url = self.endpoint.sku_types_url(virtual_cluster)?;
        let bearer = self.credentials.as_ref().map(|c| c.token.clone());
        debug!(url = %url, "Fetching SKU types");

        match self.guard(|| self.http.get_json(url, bearer)).await? {
            Outcome::Completed(Value::Object(skus)) => Ok(Outcome::Completed(skus)),
            Outcome::Completed(other) => Err(AdapterError::InvalidResponse(format!(
                "expected SKU type map, got {}",
                other
            ))),
            Outcome::ReauthRequired => Ok(Outcome::ReauthRequired),
        }
    }

    /// Forget the stored session
    pub fn logout(&self) -> Result<()> {
        info!("Clearing stored credentials");
        self.store.clear()?;
        Ok(())
    }
}

fn virtual_clusters_of(profile: &Value) -> Vec<String> {
    profile
        .get("virtualCluster")
        .and_then(Value::as_array)
        .map(|vcs| {
            vcs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
