//! Configuration file loading for ociops
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Command line flags (applied by the caller through [`ConfigOverrides`])
//! 2. Environment: `OCIOPS_*` keys, then `OCI_PROFILE` / `OCI_CONFIG_PATH`
//! 3. `--config <path>` specified file
//! 4. Project root: `./ociops.toml` or `./.ociops.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/ociops/config.toml`
//! 6. Default values

mod file_config;
mod loader;

use thiserror::Error;

pub use file_config::{
    ConfigOverrides, FileAgentConfig, FileAnthropicConfig, FileConfig, FileLoggingConfig,
    FileModelConfig, FileOciConfig, FileProvidersConfig,
};
pub use loader::ConfigLoader;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: String, reason: String },

    #[error("No Anthropic API key: set {env} or providers.anthropic.api_key")]
    MissingApiKey { env: String },
}
