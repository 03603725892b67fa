//! Messages streamed from the reasoning runtime to the session.
//!
//! [`SessionMessage`] is the unit of the streaming protocol. The runtime
//! produces them in order and the session consumes them strictly in
//! arrival order:
//!
//! ```text
//! Assistant(Text "Found ")  Assistant(Text "3 instances")  Assistant(ToolUse ..)  ...  Result
//! ```
//!
//! Each text block is the smallest unit the runtime delivers (one model
//! text delta); nothing is batched.

/// One block of assistant output
#[derive(Debug, Clone, PartialEq)]
pub enum AssistantBlock {
    /// Narrated text fragment
    Text(String),
    /// The runtime is about to dispatch a tool
    ToolUse { id: String, name: String },
    /// The dispatched tool returned
    ToolResult {
        tool_use_id: String,
        name: String,
        is_error: bool,
    },
}

/// Terminal outcome reported by the runtime
#[derive(Debug, Clone, PartialEq)]
pub struct ResultMessage {
    pub is_error: bool,
    /// Final text on success, error message on failure
    pub result: String,
    /// Number of model turns the runtime took
    pub num_turns: usize,
}

impl ResultMessage {
    pub fn success(result: impl Into<String>, num_turns: usize) -> Self {
        Self {
            is_error: false,
            result: result.into(),
            num_turns,
        }
    }

    pub fn error(message: impl Into<String>, num_turns: usize) -> Self {
        Self {
            is_error: true,
            result: message.into(),
            num_turns,
        }
    }
}

/// Tagged message produced by the reasoning runtime
#[derive(Debug, Clone, PartialEq)]
pub enum SessionMessage {
    Assistant(Vec<AssistantBlock>),
    Result(ResultMessage),
}

impl SessionMessage {
    pub fn text(fragment: impl Into<String>) -> Self {
        SessionMessage::Assistant(vec![AssistantBlock::Text(fragment.into())])
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionMessage::Result(_))
    }
}
