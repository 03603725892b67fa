//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod bucket_usage;
pub mod pagination;
pub mod run_session;
pub mod tool_helpers;
