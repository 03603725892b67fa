//! Agent configuration from TOML (`[agent]` section)

use ociops_application::ExecutionParams;
use ociops_application::ports::confirmation::ConfirmationMode;
use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
///
/// # Example
///
/// ```toml
/// [agent]
/// confirm_mutations = true     # ask before start_instance / stop_instance
/// max_tool_turns = 25
/// max_pages = 1000
/// detail_concurrency = 8
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Require an operator acknowledgement before mutating tools run
    pub confirm_mutations: bool,
    /// Maximum model turns per session
    pub max_tool_turns: usize,
    /// Sanity bound on listing page walks
    pub max_pages: usize,
    /// Bucket detail fetches in flight at once
    pub detail_concurrency: usize,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            confirm_mutations: false,
            max_tool_turns: params.max_tool_turns,
            max_pages: params.max_pages,
            detail_concurrency: params.detail_concurrency,
        }
    }
}

impl FileAgentConfig {
    pub fn confirmation_mode(&self) -> ConfirmationMode {
        ConfirmationMode::from_flag(self.confirm_mutations)
    }

    pub fn to_execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_tool_turns(self.max_tool_turns)
            .with_max_pages(self.max_pages)
            .with_detail_concurrency(self.detail_concurrency)
            .with_confirmation(self.confirmation_mode())
    }
}
