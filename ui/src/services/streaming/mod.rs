//! Streaming infrastructure for the extraction client
//!
//! Bytes arrive from an [`ExtractionTransport`], are decoded incrementally and
//! cut into event-stream frames by [`SseFrameDecoder`]. The consumption loop
//! itself lives in the client.

pub mod frame_decoder;
pub mod http_transport;
pub mod traits;
pub mod utf8_decoder;

#[cfg(test)]
pub(crate) mod scripted_transport;
#[cfg(test)]
mod frame_decoder_test;

pub use frame_decoder::*;
pub use http_transport::*;
pub use traits::*;
pub use utf8_decoder::*;

/// Cancellation signal shared between a page and its in-flight extraction
pub use tokio_util::sync::CancellationToken;
