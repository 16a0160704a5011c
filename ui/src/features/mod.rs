//! Application features: state, actions and run logic, kept apart from the
//! components that render them

pub mod extraction;
