// Domain Layer - Pure types shared by the adapter and its ports

pub mod config;
pub mod credentials;
pub mod job;
pub mod outcome;
pub mod remote_error;

// Re-exports
pub use config::{EndpointError, LauncherScheduler, PortalConfig, ServerEndpoint};
pub use credentials::Credentials;
pub use job::JobDescriptor;
pub use outcome::Outcome;
pub use remote_error::{codes, ClassifiedError, RemoteError};
