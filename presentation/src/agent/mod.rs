//! Agent presentation components
//!
//! - Interactive confirmation for mutating tools

pub mod confirmation;

pub use confirmation::InteractiveConfirmation;
