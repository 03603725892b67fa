//! Application layer for ociops
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    cloud::{
        ClientFactoryPort, CloudClients, ComputeApi, DomainClient, IdentityApi, NetworkApi,
        StorageApi,
    },
    confirmation::{
        AutoApprove, AutoReject, ConfirmationDecision, ConfirmationError, ConfirmationMode,
        ConfirmationPort,
    },
    narration::{NarrationSink, NoNarration},
    reasoning::{MessageStream, ReasoningRuntime, RuntimeError, RuntimeRequest},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::bucket_usage::BucketUsageUseCase;
pub use use_cases::pagination::collect_pages;
pub use use_cases::run_session::{AgentSession, SessionError, SessionOutcome};
pub use use_cases::tool_helpers::tool_args_preview;
