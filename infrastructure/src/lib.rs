//! Infrastructure layer for ociops
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod oci;
pub mod providers;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, ConfigOverrides, FileConfig};
pub use oci::{OciClientFactory, OciSettings};
pub use providers::anthropic::{AnthropicConfig, AnthropicRuntime};
pub use tools::{JsonSchemaToolConverter, ToolRegistry, ToolRegistryBuilder, default_registry};
