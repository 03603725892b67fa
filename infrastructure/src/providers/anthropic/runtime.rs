//! Anthropic Messages API runtime.
//!
//! [`AnthropicRuntime::start`] spawns a task that runs the tool loop and
//! returns the receiving end of its message channel:
//!
//! ```text
//! ┌── turn n ──────────────────────────────────────────────┐
//! │ POST /v1/messages (stream)                             │
//! │   text_delta ─────────────────▶ Assistant(Text)        │
//! │   tool_use blocks collected                            │
//! │ for each tool_use:                                     │
//! │   Assistant(ToolUse) ─▶ ToolExecutorPort ─▶            │
//! │   Assistant(ToolResult)                                │
//! └── tool_result blocks appended, next turn ──────────────┘
//! no tool_use ──▶ Result(success)     error / too many turns ──▶ Result(error)
//! ```
//!
//! If the receiver is dropped the task stops at its next send and the
//! HTTP stream is released with it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use ociops_application::ports::reasoning::{
    MessageStream, ReasoningRuntime, RuntimeError, RuntimeRequest,
};
use ociops_application::ports::tool_executor::ToolExecutorPort;
use ociops_domain::session::{AssistantBlock, ResultMessage, SessionMessage};
use ociops_domain::tool::ToolCall;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::sse::SseDecoder;
use super::types::{CompletedTurn, TurnAccumulator, api_error_message};

const CHANNEL_CAPACITY: usize = 64;

/// Connection settings for the Messages API
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    pub max_tokens: u32,
}

impl AnthropicConfig {
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

pub struct AnthropicRuntime {
    client: reqwest::Client,
    config: Arc<AnthropicConfig>,
}

impl AnthropicRuntime {
    pub fn new(config: AnthropicConfig) -> Result<Self, RuntimeError> {
        if config.api_key.trim().is_empty() {
            return Err(RuntimeError::NotConfigured("API key is empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| RuntimeError::NotConfigured(e.to_string()))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl ReasoningRuntime for AnthropicRuntime {
    async fn start(
        &self,
        request: RuntimeRequest,
        tools: Arc<dyn ToolExecutorPort>,
    ) -> Result<MessageStream, RuntimeError> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let tool_loop = ToolLoop {
            client: self.client.clone(),
            config: Arc::clone(&self.config),
            request,
            tools,
            tx,
        };
        info!(model = %self.config.model, "Starting model session");
        tokio::spawn(tool_loop.run());
        Ok(MessageStream::new(rx))
    }
}

/// Receiver went away; stop quietly.
struct Disconnected;

struct ToolLoop {
    client: reqwest::Client,
    config: Arc<AnthropicConfig>,
    request: RuntimeRequest,
    tools: Arc<dyn ToolExecutorPort>,
    tx: mpsc::Sender<SessionMessage>,
}

impl ToolLoop {
    async fn run(self) {
        let result = match self.drive().await {
            Ok(result) => result,
            Err(Disconnected) => {
                debug!("Session receiver dropped, stopping tool loop");
                return;
            }
        };
        let _ = self.tx.send(SessionMessage::Result(result)).await;
    }

    async fn drive(&self) -> Result<ResultMessage, Disconnected> {
        let max_turns = self.request.max_turns;
        let mut messages = vec![json!({ "role": "user", "content": self.request.query })];

        for turn in 1..=max_turns {
            let completed = match self.stream_turn(&messages).await? {
                Ok(completed) => completed,
                Err(e) => {
                    warn!(turn, error = %e, "Model turn failed");
                    return Ok(ResultMessage::error(e.to_string(), turn));
                }
            };
            debug!(
                turn,
                tool_uses = completed.tool_uses.len(),
                stop_reason = ?completed.stop_reason,
                "Model turn complete"
            );

            if completed.tool_uses.is_empty() {
                return Ok(ResultMessage::success(completed.text(), turn));
            }

            let results = self.run_tools(&completed).await?;
            messages.push(json!({ "role": "assistant", "content": completed.content }));
            messages.push(json!({ "role": "user", "content": results }));
        }

        Ok(ResultMessage::error(
            format!("Exceeded the maximum of {max_turns} model turns"),
            max_turns,
        ))
    }

    /// Dispatch the turn's tool calls in order; returns the `tool_result` blocks.
    async fn run_tools(&self, turn: &CompletedTurn) -> Result<Vec<Value>, Disconnected> {
        let mut results = Vec::with_capacity(turn.tool_uses.len());

        for tool_use in &turn.tool_uses {
            self.send(AssistantBlock::ToolUse {
                id: tool_use.id.clone(),
                name: tool_use.name.clone(),
            })
            .await?;

            let call = ToolCall::from_input(&tool_use.name, tool_use.input.clone())
                .with_native_id(&tool_use.id);
            let result = self.tools.execute(&call).await;

            self.send(AssistantBlock::ToolResult {
                tool_use_id: tool_use.id.clone(),
                name: tool_use.name.clone(),
                is_error: result.is_error(),
            })
            .await?;

            results.push(json!({
                "type": "tool_result",
                "tool_use_id": tool_use.id,
                "content": result.text(),
                "is_error": result.is_error(),
            }));
        }

        Ok(results)
    }

    /// Stream one model turn, forwarding text as it arrives.
    async fn stream_turn(
        &self,
        messages: &[Value],
    ) -> Result<Result<CompletedTurn, RuntimeError>, Disconnected> {
        let response = match self.post(messages).await {
            Ok(response) => response,
            Err(e) => return Ok(Err(e)),
        };

        let body = response.bytes_stream();
        tokio::pin!(body);
        let mut decoder = SseDecoder::new();
        let mut turn = TurnAccumulator::new();

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => return Ok(Err(RuntimeError::Stream(e.to_string()))),
            };

            for event in decoder.push(&chunk) {
                let payload: Value = match serde_json::from_str(&event.data) {
                    Ok(payload) => payload,
                    Err(e) => return Ok(Err(RuntimeError::Stream(e.to_string()))),
                };
                match turn.apply(&payload) {
                    Ok(Some(fragment)) => self.send(AssistantBlock::Text(fragment)).await?,
                    Ok(None) => {}
                    Err(e) => return Ok(Err(e)),
                }
            }

            if turn.is_complete() {
                break;
            }
        }

        Ok(turn.finish())
    }

    async fn post(&self, messages: &[Value]) -> Result<reqwest::Response, RuntimeError> {
        let mut body = json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "system": self.request.system_prompt,
            "messages": messages,
            "stream": true,
        });
        if !self.request.tools.is_empty() {
            body["tools"] = json!(self.request.tools);
        }

        let response = self
            .client
            .post(self.config.messages_url())
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", &self.config.api_version)
            .json(&body)
            .send()
            .await
            .map_err(|e| RuntimeError::Connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        Err(RuntimeError::Api {
            status: status.as_u16(),
            message: api_error_message(&text),
        })
    }

    async fn send(&self, block: AssistantBlock) -> Result<(), Disconnected> {
        self.tx
            .send(SessionMessage::Assistant(vec![block]))
            .await
            .map_err(|_| Disconnected)
    }
}
