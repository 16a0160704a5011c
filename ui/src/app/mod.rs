pub mod extractor_service;

pub use extractor_service::ExtractorService;
