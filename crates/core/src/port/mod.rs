// Port Layer - Interfaces for external collaborators

pub mod cluster_api;
pub mod credential_store;
pub mod http_fetch;
pub mod notifier;

// Re-exports
pub use cluster_api::{ApiError, ApiResult, ClusterApi};
pub use credential_store::{CredentialStore, MemoryCredentialStore, StoreError};
pub use http_fetch::HttpFetch;
pub use notifier::Notifier;
