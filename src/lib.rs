// Library interface for the Datadog to Terraform exporter
// The binary is a thin CLI over these modules

pub mod config;
pub mod datadog;
pub mod error;
pub mod export;
pub mod hcl;
pub mod naming;
pub mod resource;
pub mod terraform;

// Re-export commonly used types
pub use config::Config;
pub use datadog::DatadogClient;
pub use error::{DatadogError, Result};
pub use export::Exporter;
pub use resource::{Resource, ResourceId, ResourceKind, ResourceWrapper};
