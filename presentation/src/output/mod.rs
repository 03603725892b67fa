//! Console output for sessions

pub mod console;

pub use console::{ConsoleNarrator, ToolActivity};
