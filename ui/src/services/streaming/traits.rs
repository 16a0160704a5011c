//! Transport seam for the extraction clients (WASM-first: no Send bounds)

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use std::pin::Pin;

use crate::services::errors::ClientResult;

pub const ACCEPT_EVENT_STREAM: &str = "text/event-stream";
pub const ACCEPT_JSON: &str = "application/json";

/// Response body delivered chunk by chunk. Read errors carry the transport's
/// own description.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, String>>>>;

/// Status line plus body of an opened HTTP response
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Option<ByteStream>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Drain the whole body. Used for error bodies and non-streaming calls.
    pub async fn collect_body(&mut self) -> Result<Bytes, String> {
        let Some(body) = self.body.as_mut() else {
            return Ok(Bytes::new());
        };
        let mut collected = BytesMut::new();
        while let Some(chunk) = body.next().await {
            collected.extend_from_slice(&chunk?);
        }
        Ok(collected.freeze())
    }
}

impl std::fmt::Debug for TransportResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("has_body", &self.body.is_some())
            .finish()
    }
}

/// Opens HTTP GET requests on behalf of the extraction clients
#[async_trait(?Send)]
pub trait ExtractionTransport {
    /// Send a GET with the given `Accept` header. Only failures to obtain a
    /// response are errors; any HTTP status is returned as-is.
    async fn get(&self, url: &str, accept: &str) -> ClientResult<TransportResponse>;
}
