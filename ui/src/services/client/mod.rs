// Clients for the metadata extraction backend
//
// - extraction_client: streaming extraction with progress callbacks
// - metadata_client: one-shot JSON endpoints (metadata, enriched, health, platforms)
// - types: request and response types shared by both

pub mod extraction_client;
pub mod metadata_client;
pub mod types;

pub use extraction_client::{build_request_url, ProgressCallback, StreamingExtractionClient};
pub use metadata_client::MetadataClient;
pub use types::{
    EnrichedMetadata, EnrichedProperty, ExtractionRequest, ExtractionResult, HealthStatus,
    PlatformInfo, ProgressEvent, ProgressStatus, PropertyCategory, PropertySource, Schema,
};
