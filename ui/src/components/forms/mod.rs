pub mod extraction_form;

pub use extraction_form::*;
