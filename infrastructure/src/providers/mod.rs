//! Reasoning runtime adapters.

pub mod anthropic;

pub use anthropic::{AnthropicConfig, AnthropicRuntime};
