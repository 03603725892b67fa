//! Confirmation port for mutating tool calls.
//!
//! # Architecture
//!
//! Following the Ports and Adapters pattern:
//! - **Port**: [`ConfirmationPort`] - defined here in application layer
//! - **Adapter**: `InteractiveConfirmation` - implemented in presentation layer
//!
//! # Flow
//!
//! ```text
//! dispatch(stop_instance, {...})
//!        ↓
//! schema valid, tool is mutating, mode = Enforced
//!        ↓
//! ConfirmationPort::confirm()
//!        ↓
//! Approve → handler runs
//! Decline → ConfirmationDeclined, handler never runs
//! ```
//!
//! In [`ConfirmationMode::Advisory`] the port is never consulted; the
//! confirm-first rule lives only in the system instruction text.

use async_trait::async_trait;
use ociops_domain::tool::entities::{ToolCall, ToolDefinition};
use thiserror::Error;

/// Whether `dispatch` gates mutating tools on operator acknowledgement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmationMode {
    /// Policy is stated to the reasoning runtime only
    #[default]
    Advisory,
    /// Mutating calls need an acknowledgement from the [`ConfirmationPort`]
    Enforced,
}

impl ConfirmationMode {
    pub fn from_flag(enforced: bool) -> Self {
        if enforced {
            ConfirmationMode::Enforced
        } else {
            ConfirmationMode::Advisory
        }
    }
}

/// Operator decision on a mutating call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationDecision {
    Approve,
    Decline,
}

#[derive(Error, Debug, Clone)]
pub enum ConfirmationError {
    #[error("Confirmation cancelled")]
    Cancelled,

    #[error("I/O error: {0}")]
    Io(String),
}

/// Port for acknowledging a mutating tool call.
#[async_trait]
pub trait ConfirmationPort: Send + Sync {
    async fn confirm(
        &self,
        call: &ToolCall,
        definition: &ToolDefinition,
    ) -> Result<ConfirmationDecision, ConfirmationError>;
}

/// Approves every call (non-interactive runs with the gate disabled in practice).
pub struct AutoApprove;

#[async_trait]
impl ConfirmationPort for AutoApprove {
    async fn confirm(
        &self,
        _call: &ToolCall,
        _definition: &ToolDefinition,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        Ok(ConfirmationDecision::Approve)
    }
}

/// Declines every call (e.g. when stdin is not a terminal).
pub struct AutoReject;

#[async_trait]
impl ConfirmationPort for AutoReject {
    async fn confirm(
        &self,
        _call: &ToolCall,
        _definition: &ToolDefinition,
    ) -> Result<ConfirmationDecision, ConfirmationError> {
        Ok(ConfirmationDecision::Decline)
    }
}
