//! Repository metadata extraction
//!
//! State, actions and the run logic behind the extractor page. The reducer is
//! plain Rust so it can be exercised without a renderer.

pub mod form_validation;
pub mod logic;
pub mod types;

pub use form_validation::*;
pub use logic::execute_extraction;
pub use types::*;
