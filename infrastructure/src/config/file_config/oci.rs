//! OCI access configuration from TOML (`[oci]` section)

use std::time::Duration;

use ociops_domain::cloud::{CredentialProfile, DEFAULT_PROFILE};
use serde::{Deserialize, Serialize};

use crate::oci::{OciSettings, expand_home};

/// Raw `[oci]` section
///
/// # Example
///
/// ```toml
/// [oci]
/// config_path = "~/.oci/config"
/// profile = "PROD"
/// cli_path = "/usr/local/bin/oci"
/// command_timeout_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOciConfig {
    /// Credential store location; `~` is expanded
    pub config_path: String,
    /// Profile (section) in the credential store
    pub profile: String,
    /// `oci` executable name or path
    pub cli_path: String,
    /// Upper bound on one CLI invocation
    pub command_timeout_secs: u64,
}

impl Default for FileOciConfig {
    fn default() -> Self {
        Self {
            config_path: "~/.oci/config".to_string(),
            profile: DEFAULT_PROFILE.to_string(),
            cli_path: "oci".to_string(),
            command_timeout_secs: 120,
        }
    }
}

impl FileOciConfig {
    pub fn to_settings(&self) -> OciSettings {
        OciSettings {
            config_path: expand_home(&self.config_path),
            profile: CredentialProfile::or_default(Some(&self.profile)),
            cli_path: self.cli_path.clone(),
            command_timeout: Duration::from_secs(self.command_timeout_secs),
        }
    }
}
