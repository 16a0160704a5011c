//! This crate contains the extractor page, its components and the clients for
//! the metadata extraction backend.

pub mod app;
pub use app::ExtractorService;

pub mod components;
pub mod features;
pub mod services;
pub mod utils;

pub use services::config::ExtractorConfig;
