//! Log file configuration from TOML (`[logging]` section)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::oci::expand_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Append logs to this file as well as stderr
    pub file: Option<String>,
}

impl FileLoggingConfig {
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .map(expand_home)
    }
}
