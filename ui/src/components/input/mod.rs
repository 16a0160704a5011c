//! Input components for form entry and validation feedback

pub mod validated_input;

pub use validated_input::*;
