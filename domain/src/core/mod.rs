//! Core domain concepts shared across all subdomains.
//!
//! - [`error`] — the error taxonomy of the dispatch path and aggregation

pub mod error;
