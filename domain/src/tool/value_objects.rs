//! Tool domain value objects — immutable result and error types
//!
//! These types form the **output side** of the dispatch path. Every
//! dispatched call produces a [`ToolResult`]: an ordered list of
//! [`ToolContent`] blocks, plus a [`ToolError`] when the call failed.
//!
//! On the wire a result is the content list itself:
//!
//! ```text
//! [{"type": "text", "text": "[\n  {\n    \"id\": \"ocid1.instance...\" ..."}]
//! ```

use serde::{Deserialize, Serialize};

use crate::core::error::DispatchError;

/// One typed block of tool output. Rendered in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
}

impl ToolContent {
    pub fn text(text: impl Into<String>) -> Self {
        ToolContent::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            ToolContent::Text { text } => text,
        }
    }
}

/// Error that occurred during tool dispatch.
///
/// For provider failures `code` and `message` are the provider's own
/// values (e.g. `NotAuthorizedOrNotFound`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    pub code: String,
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&DispatchError> for ToolError {
    fn from(err: &DispatchError) -> Self {
        Self::new(err.code(), err.message())
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of one dispatched tool call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was called
    pub tool_name: String,
    /// Output blocks, in render order
    pub content: Vec<ToolContent>,
    /// Error information (for failed calls)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Wall-clock duration of the dispatch in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToolResult {
    /// Create a successful result
    pub fn success(tool_name: impl Into<String>, content: Vec<ToolContent>) -> Self {
        Self {
            tool_name: tool_name.into(),
            content,
            error: None,
            duration_ms: None,
        }
    }

    /// Create a failed result; the content carries the error text so the
    /// reasoning runtime sees the provider's code and message.
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        Self {
            tool_name: tool_name.into(),
            content: vec![ToolContent::text(format!("Error: {}", error))],
            error: Some(error),
            duration_ms: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// All text blocks joined in order
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| c.as_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ToolExecutionError;

    #[test]
    fn test_content_wire_shape() {
        let json = serde_json::to_value(vec![ToolContent::text("hello")]).unwrap();
        assert_eq!(json, serde_json::json!([{"type": "text", "text": "hello"}]));
    }

    #[test]
    fn test_failure_text_keeps_provider_code_and_message() {
        let dispatch = DispatchError::Execution(ToolExecutionError {
            tool: "list_users".to_string(),
            code: "NotAuthenticated".to_string(),
            message: "The required information to complete authentication was not provided."
                .to_string(),
        });
        let result = ToolResult::failure("list_users", ToolError::from(&dispatch));

        assert!(result.is_error());
        assert_eq!(
            result.text(),
            "Error: [NotAuthenticated] The required information to complete authentication was not provided."
        );
    }

    #[test]
    fn test_success_text_joins_blocks() {
        let result = ToolResult::success(
            "get_bucket",
            vec![ToolContent::text("a"), ToolContent::text("b")],
        )
        .with_duration_ms(12);
        assert!(!result.is_error());
        assert_eq!(result.text(), "a\nb");
        assert_eq!(result.duration_ms, Some(12));
    }
}
