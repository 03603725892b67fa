//! Credential profile and the resolved connection context

use std::path::PathBuf;

use thiserror::Error;

/// Profile used when neither configuration nor CLI names one
pub const DEFAULT_PROFILE: &str = "DEFAULT";

/// Fields every profile must carry
pub const REQUIRED_FIELDS: [&str; 5] = ["user", "fingerprint", "key_file", "tenancy", "region"];

/// Named identity in the credential store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialProfile(String);

impl CredentialProfile {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Use `name` if given and non-blank, else [`DEFAULT_PROFILE`].
    pub fn or_default(name: Option<&str>) -> Self {
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(n) => Self::new(n),
            None => Self::new(DEFAULT_PROFILE),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CredentialProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolved connection parameters for one profile.
///
/// Immutable once built; shared read-only by every client of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialContext {
    pub profile: CredentialProfile,
    /// File the profile was read from
    pub config_path: PathBuf,
    pub user: String,
    pub fingerprint: String,
    pub key_file: PathBuf,
    pub tenancy: String,
    pub region: String,
}

/// Credential store could not produce a usable context.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    #[error("OCI config file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    #[error("Failed to read OCI config {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },

    #[error("Malformed OCI config {} at line {line}: {reason}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Profile '{profile}' not found in {}", .path.display())]
    ProfileNotFound { profile: String, path: PathBuf },

    #[error("Profile '{profile}' is missing required field '{field}'")]
    MissingField { profile: String, field: String },

    #[error("Key file for profile '{profile}' not found: {}", .path.display())]
    KeyFileMissing { profile: String, path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_fallback() {
        assert_eq!(CredentialProfile::or_default(None).name(), DEFAULT_PROFILE);
        assert_eq!(CredentialProfile::or_default(Some("  ")).name(), DEFAULT_PROFILE);
        assert_eq!(CredentialProfile::or_default(Some("PROD")).name(), "PROD");
    }

    #[test]
    fn test_error_names_profile() {
        let err = CredentialError::ProfileNotFound {
            profile: "PROD".to_string(),
            path: PathBuf::from("/home/op/.oci/config"),
        };
        assert_eq!(
            err.to_string(),
            "Profile 'PROD' not found in /home/op/.oci/config"
        );
    }
}
