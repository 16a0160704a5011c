//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: timestamped console logging that also works off-browser
//! - **validation**: repository URL classification and the matching input styles

pub mod console_macros;
pub mod validation;

pub use validation::*;
