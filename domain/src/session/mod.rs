//! Agent session domain.
//!
//! - [`stream::SessionMessage`] — one unit of the runtime's output stream
//! - [`state::SessionState`] — the single-use session state machine

pub mod state;
pub mod stream;

pub use state::{InvalidTransition, SessionEvent, SessionState, TerminalStatus};
pub use stream::{AssistantBlock, ResultMessage, SessionMessage};
