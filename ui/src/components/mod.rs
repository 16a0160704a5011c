//! User Interface Components
//!
//! Reusable Dioxus components for the extractor page:
//!
//! - **forms**: the repository / schema / token form
//! - **display**: loading indicator, step progress and result rendering
//! - **input**: validated input fields

pub mod display;
pub mod forms;
pub mod input;
