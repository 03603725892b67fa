//! Reasoning runtime port
//!
//! The runtime owns natural-language understanding and turn planning. It
//! receives the query, the system instruction text and the tool schemas,
//! runs tools through the [`ToolExecutorPort`] it is given, and streams
//! [`SessionMessage`]s back until a terminal result.

use std::sync::Arc;

use async_trait::async_trait;
use ociops_domain::session::SessionMessage;
use thiserror::Error;
use tokio::sync::mpsc;

use super::tool_executor::ToolExecutorPort;

/// Errors raised while starting a runtime session.
///
/// Failures after the stream has started arrive as an error
/// [`ResultMessage`](ociops_domain::session::ResultMessage) instead.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Reasoning runtime not configured: {0}")]
    NotConfigured(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Stream error: {0}")]
    Stream(String),
}

/// Everything the runtime needs for one session
#[derive(Debug, Clone)]
pub struct RuntimeRequest {
    pub system_prompt: String,
    pub query: String,
    /// Tool schemas as produced by the [`ToolSchemaPort`](super::tool_schema::ToolSchemaPort)
    pub tools: Vec<serde_json::Value>,
    /// Upper bound on model turns before the runtime gives up
    pub max_turns: usize,
}

/// Ordered stream of session messages
pub struct MessageStream {
    receiver: mpsc::Receiver<SessionMessage>,
}

impl MessageStream {
    pub fn new(receiver: mpsc::Receiver<SessionMessage>) -> Self {
        Self { receiver }
    }

    /// Next message, or `None` once the runtime has gone away.
    pub async fn next(&mut self) -> Option<SessionMessage> {
        self.receiver.recv().await
    }
}

/// Port for the conversational model runtime
#[async_trait]
pub trait ReasoningRuntime: Send + Sync {
    /// Start a session; tool calls are routed to `tools` for its whole duration.
    async fn start(
        &self,
        request: RuntimeRequest,
        tools: Arc<dyn ToolExecutorPort>,
    ) -> Result<MessageStream, RuntimeError>;
}
