//! Prompt text for the reasoning runtime

pub mod system;

pub use system::SystemPrompt;
