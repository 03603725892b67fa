//! Tool domain module
//!
//! This module defines the contract between the reasoning runtime and the
//! typed cloud API: how a tool is described, how a call is checked, and
//! what a call returns.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDefinition`] (name, typed parameters,
//! mutability), invoked via a [`ToolCall`], and answers with a
//! [`ToolResult`] made of ordered [`ToolContent`] blocks.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (unique)     │    │ (invocation) │    │ (content)    │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! # Mutating tools
//!
//! Each tool has a [`Mutability`]. Mutating tools (`start_instance`,
//! `stop_instance`) are listed in the system instruction text so the
//! runtime states intent and asks first; the registry can additionally
//! require an operator acknowledgement before running them.
//!
//! # Key Types
//!
//! - [`ToolSpec`] — name-unique set of definitions
//! - [`ToolValidator`] / [`SchemaValidator`] — strict argument checking
//! - [`ToolProvider`] — per-domain group of action handlers

pub mod entities;
pub mod provider;
pub mod traits;
pub mod value_objects;

pub use entities::{Mutability, ParamType, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
pub use provider::{ProviderError, ToolProvider, json_content};
pub use traits::{SchemaValidator, ToolValidator};
pub use value_objects::{ToolContent, ToolError, ToolResult};
