//! Messages API stream events and turn assembly.
//!
//! A turn arrives as:
//!
//! ```text
//! message_start
//! content_block_start(index, text | tool_use{id, name})
//! content_block_delta(index, text_delta | input_json_delta)*
//! content_block_stop(index)
//! ...
//! message_delta(stop_reason)
//! message_stop
//! ```
//!
//! [`TurnAccumulator`] folds those events into the assistant content
//! (kept for the next request) and the tool calls to dispatch.

use std::collections::BTreeMap;

use ociops_application::ports::reasoning::RuntimeError;
use serde_json::{Value, json};

/// A tool call requested by the model
#[derive(Debug, Clone, PartialEq)]
pub struct PendingToolUse {
    pub id: String,
    pub name: String,
    pub input: Value,
}

/// A fully received model turn
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTurn {
    /// Assistant content blocks in API form
    pub content: Vec<Value>,
    pub tool_uses: Vec<PendingToolUse>,
    pub stop_reason: Option<String>,
}

impl CompletedTurn {
    /// Text blocks of the turn, concatenated
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|block| block.get("text").and_then(Value::as_str))
            .collect()
    }
}

#[derive(Debug)]
enum BlockState {
    Text(String),
    ToolUse {
        id: String,
        name: String,
        input_json: String,
    },
}

#[derive(Debug, Default)]
pub struct TurnAccumulator {
    blocks: BTreeMap<usize, BlockState>,
    stop_reason: Option<String>,
    complete: bool,
}

fn str_field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("")
}

impl TurnAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Apply one event; returns a text fragment to narrate, if any.
    pub fn apply(&mut self, event: &Value) -> Result<Option<String>, RuntimeError> {
        let index = event
            .get("index")
            .and_then(Value::as_u64)
            .and_then(|i| usize::try_from(i).ok())
            .unwrap_or(0);

        match str_field(event, "type") {
            "content_block_start" => {
                let block = event.get("content_block").unwrap_or(&Value::Null);
                match str_field(block, "type") {
                    "text" => {
                        self.blocks
                            .insert(index, BlockState::Text(str_field(block, "text").to_string()));
                    }
                    "tool_use" => {
                        self.blocks.insert(
                            index,
                            BlockState::ToolUse {
                                id: str_field(block, "id").to_string(),
                                name: str_field(block, "name").to_string(),
                                input_json: String::new(),
                            },
                        );
                    }
                    _ => {}
                }
                Ok(None)
            }
            "content_block_delta" => {
                let delta = event.get("delta").unwrap_or(&Value::Null);
                match (str_field(delta, "type"), self.blocks.get_mut(&index)) {
                    ("text_delta", Some(BlockState::Text(text))) => {
                        let fragment = str_field(delta, "text");
                        text.push_str(fragment);
                        Ok((!fragment.is_empty()).then(|| fragment.to_string()))
                    }
                    ("input_json_delta", Some(BlockState::ToolUse { input_json, .. })) => {
                        input_json.push_str(str_field(delta, "partial_json"));
                        Ok(None)
                    }
                    _ => Ok(None),
                }
            }
            "message_delta" => {
                if let Some(reason) = event
                    .get("delta")
                    .and_then(|d| d.get("stop_reason"))
                    .and_then(Value::as_str)
                {
                    self.stop_reason = Some(reason.to_string());
                }
                Ok(None)
            }
            "message_stop" => {
                self.complete = true;
                Ok(None)
            }
            "error" => {
                let error = event.get("error").unwrap_or(&Value::Null);
                Err(RuntimeError::Stream(format!(
                    "{}: {}",
                    str_field(error, "type"),
                    str_field(error, "message")
                )))
            }
            // message_start, content_block_stop, ping
            _ => Ok(None),
        }
    }

    pub fn finish(self) -> Result<CompletedTurn, RuntimeError> {
        if !self.complete {
            return Err(RuntimeError::Stream(
                "stream ended before message_stop".to_string(),
            ));
        }

        let mut content = Vec::new();
        let mut tool_uses = Vec::new();

        for block in self.blocks.into_values() {
            match block {
                BlockState::Text(text) if text.is_empty() => {}
                BlockState::Text(text) => content.push(json!({ "type": "text", "text": text })),
                BlockState::ToolUse {
                    id,
                    name,
                    input_json,
                } => {
                    let input: Value = if input_json.trim().is_empty() {
                        json!({})
                    } else {
                        serde_json::from_str(&input_json).map_err(|e| {
                            RuntimeError::Stream(format!("invalid input for tool '{name}': {e}"))
                        })?
                    };
                    content.push(json!({
                        "type": "tool_use",
                        "id": id,
                        "name": name,
                        "input": input,
                    }));
                    tool_uses.push(PendingToolUse { id, name, input });
                }
            }
        }

        Ok(CompletedTurn {
            content,
            tool_uses,
            stop_reason: self.stop_reason,
        })
    }
}

/// Readable message from an API error body.
pub fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            let error = v.get("error")?;
            Some(format!(
                "{}: {}",
                str_field(error, "type"),
                str_field(error, "message")
            ))
        })
        .unwrap_or_else(|| body.trim().to_string())
}
