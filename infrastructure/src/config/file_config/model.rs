//! Model selection from TOML (`[model]` section)

use serde::{Deserialize, Serialize};

/// Raw `[model]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    /// Model identifier sent to the Messages API
    pub name: String,
    /// Output token limit per model turn
    pub max_tokens: u32,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            name: "claude-sonnet-4-5".to_string(),
            max_tokens: 8192,
        }
    }
}
