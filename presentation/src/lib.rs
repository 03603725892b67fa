//! Presentation layer for ociops
//!
//! This crate contains the CLI definition, console narration and the
//! interactive confirmation prompt.

pub mod agent;
pub mod cli;
pub mod output;

// Re-export commonly used types
pub use agent::InteractiveConfirmation;
pub use cli::commands::Cli;
pub use output::{ConsoleNarrator, ToolActivity};
