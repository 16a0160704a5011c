//! Infrastructure Services
//!
//! - **client**: streaming and one-shot clients for the extraction backend
//! - **streaming**: transport seam, incremental UTF-8 and event-stream decoding, cancellation
//! - **config**: backend location and endpoint paths
//! - **errors**: the error taxonomy shared by every client call
//!
//! The services are WASM-first: async traits carry no Send bounds and nothing
//! here touches the DOM.

pub mod client;
pub mod config;
pub mod errors;
pub mod streaming;
