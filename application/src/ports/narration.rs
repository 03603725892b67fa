//! Narration port
//!
//! Defines the operator-facing output of a session.

/// Receives session output as it happens
///
/// Implementations live in the presentation layer. `on_text` is called
/// once per fragment, in runtime order, before the next message is read.
pub trait NarrationSink: Send + Sync {
    /// A narrated text fragment
    fn on_text(&self, fragment: &str);

    /// The runtime started a tool call
    fn on_tool_start(&self, _name: &str) {}

    /// A tool call finished
    fn on_tool_end(&self, _name: &str, _is_error: bool) {}

    /// The session ended with an error; partial narration has already been emitted
    fn on_session_error(&self, message: &str);

    /// The session ended successfully
    fn on_session_end(&self) {}
}

/// No-op sink for when output is not needed
pub struct NoNarration;

impl NarrationSink for NoNarration {
    fn on_text(&self, _fragment: &str) {}
    fn on_session_error(&self, _message: &str) {}
}
