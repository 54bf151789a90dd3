// PAI Job Client Core - Domain Logic & Ports
// NO infrastructure dependencies (hexagonal architecture)

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use application::JobClientAdapter;
pub use domain::{
    ClassifiedError, Credentials, EndpointError, JobDescriptor, LauncherScheduler, Outcome,
    PortalConfig, RemoteError, ServerEndpoint,
};
pub use error::{AdapterError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
