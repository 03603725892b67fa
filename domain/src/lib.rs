//! Domain layer for ociops
//!
//! This crate contains the core types and pure algorithms. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! The reasoning runtime acts on the tenancy only through named tools.
//! A tool has a typed input schema and a mutability classification;
//! dispatch validates arguments strictly and reports provider errors
//! verbatim.
//!
//! ## Usage aggregation
//!
//! Bucket storage is rolled up by owning identity, with deterministic
//! ordering and lossy gigabyte figures derived from authoritative bytes.
//!
//! ## Sessions
//!
//! One query in, one answer out. The runtime streams [`SessionMessage`]s
//! which drive a single-use [`SessionState`] machine.

pub mod cloud;
pub mod core;
pub mod prompt;
pub mod session;
pub mod tool;
pub mod usage;

// Re-export commonly used types
pub use cloud::{
    CloudError, CredentialContext, CredentialError, CredentialProfile, InstanceAction, Page,
    ResourceDomain,
};
pub use core::error::{
    DispatchError, DuplicateToolError, FieldIssue, PaginationExhaustionError,
    SchemaValidationError, ToolExecutionError,
};
pub use prompt::SystemPrompt;
pub use session::{
    AssistantBlock, ResultMessage, SessionEvent, SessionMessage, SessionState, TerminalStatus,
};
pub use tool::{
    Mutability, ParamType, ProviderError, SchemaValidator, ToolCall, ToolContent, ToolDefinition,
    ToolError, ToolParameter, ToolProvider, ToolResult, ToolSpec, ToolValidator,
};
pub use usage::{OwnerUsage, UsageReport, bytes_to_gb};
