// Application Layer - Use cases

pub mod adapter;


// Re-exports
pub use adapter::JobClientAdapter;
