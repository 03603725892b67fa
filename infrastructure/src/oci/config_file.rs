//! OCI credential store reader.
//!
//! The store is an INI file of `[PROFILE]` sections holding `key=value`
//! pairs. Values in `[DEFAULT]` are inherited by every other profile.
//! Lines starting with `#` or `;` are comments.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ociops_domain::cloud::credentials::REQUIRED_FIELDS;
use ociops_domain::cloud::{CredentialContext, CredentialError, CredentialProfile, DEFAULT_PROFILE};
use tracing::debug;

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

/// Parsed credential store
#[derive(Debug, Clone)]
pub struct OciConfigFile {
    path: PathBuf,
    sections: HashMap<String, HashMap<String, String>>,
}

impl OciConfigFile {
    /// Read and parse the store at `path`.
    pub fn load(path: &Path) -> Result<Self, CredentialError> {
        if !path.exists() {
            return Err(CredentialError::ConfigMissing(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|e| CredentialError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &contents)
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, CredentialError> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let malformed = |reason: &str| CredentialError::Malformed {
                path: path.to_path_buf(),
                line: index + 1,
                reason: reason.to_string(),
            };

            if let Some(header) = line.strip_prefix('[') {
                let name = header
                    .strip_suffix(']')
                    .map(str::trim)
                    .filter(|n| !n.is_empty())
                    .ok_or_else(|| malformed("invalid section header"))?;
                sections.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| malformed("expected key=value"))?;
            let section = current
                .as_ref()
                .ok_or_else(|| malformed("key outside of a profile section"))?;
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        Ok(Self {
            path: path.to_path_buf(),
            sections,
        })
    }

    /// Profile names in the store, sorted.
    pub fn profiles(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sections.keys().map(String::as_str).collect();
        names.sort();
        names
    }

    /// Values for `profile` with `[DEFAULT]` inherited, or `None` if absent.
    pub fn profile_values(&self, profile: &str) -> Option<HashMap<String, String>> {
        let own = self.sections.get(profile)?;
        let mut merged = self.sections.get(DEFAULT_PROFILE).cloned().unwrap_or_default();
        merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
        Some(merged)
    }

    /// Build a validated context for `profile`.
    pub fn resolve(&self, profile: &CredentialProfile) -> Result<CredentialContext, CredentialError> {
        let values =
            self.profile_values(profile.name())
                .ok_or_else(|| CredentialError::ProfileNotFound {
                    profile: profile.name().to_string(),
                    path: self.path.clone(),
                })?;

        let field = |name: &str| -> Result<String, CredentialError> {
            values
                .get(name)
                .filter(|v| !v.is_empty())
                .cloned()
                .ok_or_else(|| CredentialError::MissingField {
                    profile: profile.name().to_string(),
                    field: name.to_string(),
                })
        };

        for name in REQUIRED_FIELDS {
            field(name)?;
        }

        let key_file = expand_home(&field("key_file")?);
        if !key_file.exists() {
            return Err(CredentialError::KeyFileMissing {
                profile: profile.name().to_string(),
                path: key_file,
            });
        }

        debug!(profile = %profile, path = %self.path.display(), "Resolved OCI profile");

        Ok(CredentialContext {
            profile: profile.clone(),
            config_path: self.path.clone(),
            user: field("user")?,
            fingerprint: field("fingerprint")?,
            key_file,
            tenancy: field("tenancy")?,
            region: field("region")?,
        })
    }
}
