//! Session state machine
//!
//! ```text
//! Idle ──query──▶ AwaitingModelTurn ──text──▶ StreamingText ─┐
//!                        │   ▲                     │    ▲     │ text
//!                        │   └──── tool round ─────┘    └─────┘
//!                        ▼                              │
//!              Terminal(Success | Error) ◀──────────────┘
//! ```
//!
//! A session is single-use: once terminal, every further event is rejected.

use thiserror::Error;

/// How a session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalStatus {
    Success,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingModelTurn,
    StreamingText,
    Terminal(TerminalStatus),
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    QueryAccepted,
    TextReceived,
    /// A tool round-trip started; narration resumes after the result
    ToolRoundTrip,
    Completed,
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid session transition from {from:?} on {event:?}")]
pub struct InvalidTransition {
    pub from: SessionState,
    pub event: SessionEvent,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Terminal(_))
    }

    pub fn transition(self, event: SessionEvent) -> Result<SessionState, InvalidTransition> {
        use SessionEvent as E;
        use SessionState as S;

        match (&self, &event) {
            (S::Idle, E::QueryAccepted) => Ok(S::AwaitingModelTurn),
            (S::AwaitingModelTurn | S::StreamingText, E::TextReceived) => Ok(S::StreamingText),
            (S::AwaitingModelTurn | S::StreamingText, E::ToolRoundTrip) => {
                Ok(S::AwaitingModelTurn)
            }
            (S::AwaitingModelTurn | S::StreamingText, E::Completed) => {
                Ok(S::Terminal(TerminalStatus::Success))
            }
            (S::AwaitingModelTurn | S::StreamingText, E::Failed(message)) => {
                Ok(S::Terminal(TerminalStatus::Error(message.clone())))
            }
            _ => Err(InvalidTransition { from: self, event }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = SessionState::Idle
            .transition(SessionEvent::QueryAccepted)
            .and_then(|s| s.transition(SessionEvent::TextReceived))
            .and_then(|s| s.transition(SessionEvent::ToolRoundTrip))
            .and_then(|s| s.transition(SessionEvent::TextReceived))
            .and_then(|s| s.transition(SessionEvent::Completed))
            .unwrap();
        assert_eq!(state, SessionState::Terminal(TerminalStatus::Success));
    }

    #[test]
    fn test_error_from_awaiting() {
        let state = SessionState::Idle
            .transition(SessionEvent::QueryAccepted)
            .and_then(|s| s.transition(SessionEvent::Failed("boom".to_string())))
            .unwrap();
        assert_eq!(
            state,
            SessionState::Terminal(TerminalStatus::Error("boom".to_string()))
        );
    }

    #[test]
    fn test_single_use() {
        let err = SessionState::Terminal(TerminalStatus::Success)
            .transition(SessionEvent::QueryAccepted)
            .unwrap_err();
        assert_eq!(err.event, SessionEvent::QueryAccepted);
    }

    #[test]
    fn test_text_before_query_rejected() {
        assert!(SessionState::Idle.transition(SessionEvent::TextReceived).is_err());
    }
}
