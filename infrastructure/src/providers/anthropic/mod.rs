//! Anthropic Messages API adapter for the reasoning runtime port.
//!
//! - [`sse`] splits the response body into server-sent events
//! - [`types`] folds stream events into one completed model turn
//! - [`runtime`] drives the tool loop over successive turns

pub mod runtime;
pub mod sse;
pub mod types;

pub use runtime::{AnthropicConfig, AnthropicRuntime};
