//! In-memory transport for client tests: replays a fixed response and records
//! every request it receives.

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::traits::{ByteStream, ExtractionTransport, TransportResponse};
use crate::services::errors::{ClientResult, ExtractionError};

#[derive(Clone, Debug)]
pub enum ScriptedChunk {
    Data(Vec<u8>),
    ReadError(String),
}

#[derive(Clone, Debug)]
pub(crate) struct ScriptedTransport {
    status: u16,
    status_text: String,
    chunks: Option<Vec<ScriptedChunk>>,
    connect_error: Option<String>,
    /// Keep the body open after the scripted chunks instead of ending it
    stall: bool,
    pub requests: Rc<RefCell<Vec<(String, String)>>>,
    /// Number of chunks handed to the client so far
    pub chunks_read: Rc<Cell<usize>>,
}

impl ScriptedTransport {
    pub fn ok<I, S>(chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self::with_status(200, "OK", chunks)
    }

    pub fn with_status<I, S>(status: u16, status_text: &str, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        Self {
            status,
            status_text: status_text.to_string(),
            chunks: Some(
                chunks
                    .into_iter()
                    .map(|chunk| ScriptedChunk::Data(chunk.as_ref().to_vec()))
                    .collect(),
            ),
            connect_error: None,
            stall: false,
            requests: Rc::new(RefCell::new(Vec::new())),
            chunks_read: Rc::new(Cell::new(0)),
        }
    }

    pub fn from_chunks(chunks: Vec<ScriptedChunk>) -> Self {
        let mut transport = Self::ok(Vec::<Vec<u8>>::new());
        transport.chunks = Some(chunks);
        transport
    }

    pub fn without_body() -> Self {
        let mut transport = Self::ok(Vec::<Vec<u8>>::new());
        transport.chunks = None;
        transport
    }

    pub fn unreachable(message: &str) -> Self {
        let mut transport = Self::ok(Vec::<Vec<u8>>::new());
        transport.connect_error = Some(message.to_string());
        transport
    }

    /// Like [`with_status`](Self::with_status), but the body never ends
    pub fn stalled<I, S>(status: u16, status_text: &str, chunks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut transport = Self::with_status(status, status_text, chunks);
        transport.stall = true;
        transport
    }
}

#[async_trait(?Send)]
impl ExtractionTransport for ScriptedTransport {
    async fn get(&self, url: &str, accept: &str) -> ClientResult<TransportResponse> {
        self.requests
            .borrow_mut()
            .push((url.to_string(), accept.to_string()));

        if let Some(message) = &self.connect_error {
            return Err(ExtractionError::transport(message.clone()));
        }

        let stall = self.stall;
        let body = self.chunks.clone().map(|chunks| {
            let counter = self.chunks_read.clone();
            let scripted = stream::iter(chunks.into_iter().map(move |chunk| {
                counter.set(counter.get() + 1);
                match chunk {
                    ScriptedChunk::Data(data) => Ok(Bytes::from(data)),
                    ScriptedChunk::ReadError(message) => Err(message),
                }
            }));
            let stream: ByteStream = if stall {
                Box::pin(scripted.chain(stream::pending()))
            } else {
                Box::pin(scripted)
            };
            stream
        });

        Ok(TransportResponse {
            status: self.status,
            status_text: self.status_text.clone(),
            body,
        })
    }
}
