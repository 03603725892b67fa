//! Tool provider abstraction
//!
//! A [`ToolProvider`] groups the action handlers of one resource domain
//! and is plugged into the tool registry at startup:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     ToolRegistry                            │
//! │  (name uniqueness, schema validation, confirmation gate)    │
//! └─────────────────────────────────────────────────────────────┘
//!           │              │              │              │
//!           ▼              ▼              ▼              ▼
//!    ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!    │ Compute  │   │ Network  │   │ Storage  │   │ Identity │
//!    │  tools   │   │  tools   │   │  tools   │   │  tools   │
//!    └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! Handlers share no state with one another; each receives its domain
//! client at construction time and turns a validated [`ToolCall`] into
//! content blocks.

use async_trait::async_trait;
use thiserror::Error;

use super::entities::{ToolCall, ToolDefinition};
use super::value_objects::ToolContent;
use crate::cloud::error::CloudError;

/// Error raised by an action handler
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider does not implement this tool
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Arguments passed validation but the handler cannot use them
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The cloud call failed
    #[error(transparent)]
    Cloud(#[from] CloudError),

    /// The payload could not be encoded
    #[error("Failed to encode payload: {0}")]
    Encoding(String),
}

impl ProviderError {
    /// Error code; provider codes pass through untouched
    pub fn code(&self) -> String {
        match self {
            ProviderError::ToolNotFound(_) => "NotFound".to_string(),
            ProviderError::InvalidArgument(_) => "InvalidArgument".to_string(),
            ProviderError::Cloud(e) => e.code().to_string(),
            ProviderError::Encoding(_) => "EncodingFailed".to_string(),
        }
    }

    /// Error message; provider messages pass through untouched
    pub fn message(&self) -> String {
        match self {
            ProviderError::Cloud(e) => e.message(),
            other => other.to_string(),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        ProviderError::Encoding(err.to_string())
    }
}

/// A source of tools for one resource domain.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// Unique identifier for this provider
    ///
    /// Examples: "compute", "network", "storage", "identity"
    fn id(&self) -> &str;

    /// Display name for user-facing output
    fn display_name(&self) -> &str;

    /// Definitions of every tool this provider handles
    fn tools(&self) -> Vec<ToolDefinition>;

    /// Run the handler for `call`.
    ///
    /// The registry validates arguments before calling this.
    async fn execute(&self, call: &ToolCall) -> Result<Vec<ToolContent>, ProviderError>;
}

/// Serialize a payload as the pretty-printed text block tools return.
pub fn json_content<T: serde::Serialize + ?Sized>(
    payload: &T,
) -> Result<Vec<ToolContent>, ProviderError> {
    Ok(vec![ToolContent::text(serde_json::to_string_pretty(payload)?)])
}
