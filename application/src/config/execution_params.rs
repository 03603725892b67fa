//! Execution parameters — use case loop control.
//!
//! [`ExecutionParams`] groups the static parameters that bound the tool
//! loop and the usage aggregation. These are application-layer concerns,
//! constructed once at startup and passed into constructors.

use serde::{Deserialize, Serialize};

use crate::ports::confirmation::ConfirmationMode;

/// Loop and aggregation bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum model turns in one session's tool loop.
    pub max_tool_turns: usize,
    /// Sanity bound on the bucket page walk.
    pub max_pages: usize,
    /// Bucket detail fetches in flight at once.
    pub detail_concurrency: usize,
    /// Whether mutating tools need an operator acknowledgement.
    #[serde(skip)]
    pub confirmation: ConfirmationMode,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_tool_turns: 25,
            max_pages: 1000,
            detail_concurrency: 8,
            confirmation: ConfirmationMode::Advisory,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_max_tool_turns(mut self, max: usize) -> Self {
        self.max_tool_turns = max;
        self
    }

    pub fn with_max_pages(mut self, max: usize) -> Self {
        self.max_pages = max;
        self
    }

    /// Zero is raised to one.
    pub fn with_detail_concurrency(mut self, n: usize) -> Self {
        self.detail_concurrency = n.max(1);
        self
    }

    pub fn with_confirmation(mut self, mode: ConfirmationMode) -> Self {
        self.confirmation = mode;
        self
    }
}
