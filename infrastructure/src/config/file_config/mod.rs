//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Each section converts into the explicit settings type its adapter takes.

mod agent;
mod logging;
mod model;
mod oci;
mod providers;

pub use agent::FileAgentConfig;
pub use logging::FileLoggingConfig;
pub use model::FileModelConfig;
pub use oci::FileOciConfig;
pub use providers::{FileAnthropicConfig, FileProvidersConfig};

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::providers::anthropic::AnthropicConfig;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Credential store and CLI settings
    pub oci: FileOciConfig,
    /// Model selection
    pub model: FileModelConfig,
    /// Reasoning provider settings
    pub providers: FileProvidersConfig,
    /// Tool loop and confirmation settings
    pub agent: FileAgentConfig,
    /// Log file settings
    pub logging: FileLoggingConfig,
}

/// Command line values that take precedence over every file and env source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub profile: Option<String>,
    pub model: Option<String>,
    /// Only ever switches confirmation on
    pub confirm_mutations: bool,
}

impl FileConfig {
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(profile) = overrides.profile.as_deref().filter(|p| !p.trim().is_empty()) {
            self.oci.profile = profile.to_string();
        }
        if let Some(model) = overrides.model.as_deref().filter(|m| !m.trim().is_empty()) {
            self.model.name = model.to_string();
        }
        if overrides.confirm_mutations {
            self.agent.confirm_mutations = true;
        }
        self
    }

    /// Reject values no adapter can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| ConfigError::Invalid {
            field: field.to_string(),
            reason: reason.to_string(),
        };

        if self.model.name.trim().is_empty() {
            return Err(invalid("model.name", "must not be empty"));
        }
        if self.model.max_tokens == 0 {
            return Err(invalid("model.max_tokens", "must be greater than zero"));
        }
        if self.oci.command_timeout_secs == 0 {
            return Err(invalid("oci.command_timeout_secs", "must be greater than zero"));
        }
        if self.agent.max_tool_turns == 0 {
            return Err(invalid("agent.max_tool_turns", "must be greater than zero"));
        }
        if self.agent.max_pages == 0 {
            return Err(invalid("agent.max_pages", "must be greater than zero"));
        }
        Ok(())
    }

    /// Runtime settings with the API key looked up through `env`.
    pub fn anthropic_config(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<AnthropicConfig, ConfigError> {
        let provider = &self.providers.anthropic;
        Ok(AnthropicConfig {
            api_key: provider.resolve_api_key(env)?,
            base_url: provider.base_url.clone(),
            api_version: provider.api_version.clone(),
            model: self.model.name.clone(),
            max_tokens: self.model.max_tokens,
        })
    }
}
