//! Application-level configuration.
//!
//! - [`ExecutionParams`] — tool loop and aggregation bounds

pub mod execution_params;

pub use execution_params::ExecutionParams;
