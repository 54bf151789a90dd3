//! PAI Job SDK - REST binding for the cluster API
//!
//! Implements the `ClusterApi` and `HttpFetch` ports of `paijob-core` on top
//! of `reqwest`.
//!
//! # Example
//!
//! ```no_run
//! use paijob_core::port::ClusterApi;
//! use paijob_core::{Credentials, JobDescriptor, ServerEndpoint};
//! use paijob_sdk::PaiRestClient;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let endpoint = ServerEndpoint::resolve("http://10.0.0.1:9186", None)?;
//!     let client = PaiRestClient::new(
//!         endpoint,
//!         Some(Credentials::new("alice", "token")),
//!         Duration::from_secs(30),
//!     )?;
//!
//!     let job = JobDescriptor::from_yaml("protocolVersion: 2\nname: demo")?;
//!     let response = client.create_job(&job).await?;
//!     println!("Job submitted: {}", response);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod fetch;

pub use client::PaiRestClient;
pub use error::{Result, SdkError};
pub use fetch::ReqwestFetch;
