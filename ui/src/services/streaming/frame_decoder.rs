//! Event-stream framing for the extraction endpoint
//!
//! The backend writes frames of the form `event: <name>\ndata: <json>\n\n`.
//! [`SseFrameDecoder`] owns the parse buffer for one stream: decoded text is
//! appended as it arrives and every block terminated by a blank line is handed
//! out as a complete frame. Anything after the last terminator stays buffered
//! until the next read.

use super::utf8_decoder::Utf8ChunkDecoder;
use crate::services::client::{ExtractionResult, ProgressEvent};
use crate::services::errors::{detail_from_value, ExtractionError, EXTRACTION_FAILED_FALLBACK};

const FRAME_DELIMITER: &str = "\n\n";

pub const EVENT_PROGRESS: &str = "progress";
pub const EVENT_RESULT: &str = "result";
pub const EVENT_ERROR: &str = "error";

/// One blank-line-delimited block of the wire stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamFrame {
    pub event: Option<String>,
    pub data: String,
}

/// What a parsed frame means to the consumption loop
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    Progress(ProgressEvent),
    /// Terminal success
    Result(Box<ExtractionResult>),
    /// Terminal failure reported by the server
    Failed(ExtractionError),
    /// Unknown event name, kept for logging only
    Ignored(String),
}

impl StreamEvent {
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Result(_) | StreamEvent::Failed(_))
    }
}

/// Incremental decoder: bytes in, complete frame blocks out
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    text: Utf8ChunkDecoder,
    buffer: String,
}

impl SseFrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw chunk and return every block completed by it, in order
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let decoded = self.text.decode(chunk);
        self.buffer.push_str(&decoded);
        self.take_complete_blocks()
    }

    /// Signal end-of-data. Flushes the text decoder into the buffer; an
    /// unterminated trailing block is never a frame.
    pub fn finish(&mut self) -> Vec<String> {
        let tail = self.text.finish();
        self.buffer.push_str(&tail);
        self.take_complete_blocks()
    }

    /// Text received but not yet resolved into a frame
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    fn take_complete_blocks(&mut self) -> Vec<String> {
        let mut blocks = Vec::new();
        let mut consumed = 0;

        while let Some(offset) = self.buffer[consumed..].find(FRAME_DELIMITER) {
            let end = consumed + offset;
            blocks.push(self.buffer[consumed..end].to_string());
            consumed = end + FRAME_DELIMITER.len();
        }

        if consumed > 0 {
            self.buffer.drain(..consumed);
        }
        blocks
    }
}

/// Parse one block into a frame.
///
/// Returns `None` for blank blocks and for blocks without a payload. The event
/// name is the first `event:` line anywhere in the block. The payload starts at
/// the first `data:` line and runs to the end of the block: later `data:`
/// prefixes are stripped so multi-line payloads join back up, every other line
/// is kept as-is.
pub fn parse_frame(block: &str) -> Option<StreamFrame> {
    if block.trim().is_empty() {
        return None;
    }

    let event = block
        .lines()
        .find_map(|line| field_value(line, "event"))
        .map(|name| name.trim().to_string());

    let mut lines = block.lines().skip_while(|line| field_value(line, "data").is_none());
    let first = field_value(lines.next()?, "data")?;
    let data_lines: Vec<&str> = std::iter::once(first)
        .chain(lines.map(|line| field_value(line, "data").unwrap_or(line)))
        .collect();

    let data = data_lines.join("\n");
    if data.trim().is_empty() {
        return None;
    }

    Some(StreamFrame { event, data })
}

/// Value of `name: value` (single optional space after the colon)
fn field_value<'a>(line: &'a str, name: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(name)?.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}

/// Decode the frame payload and classify it.
///
/// A payload that is not valid JSON, or that does not match the shape its
/// event name promises, is a protocol error.
pub fn interpret_frame(frame: &StreamFrame) -> Result<StreamEvent, ExtractionError> {
    let payload: serde_json::Value = serde_json::from_str(&frame.data).map_err(|e| {
        ExtractionError::protocol(format!("Malformed event payload: {}", e))
    })?;

    let event_name = frame.event.as_deref().unwrap_or_default();
    match event_name {
        EVENT_PROGRESS => serde_json::from_value::<ProgressEvent>(payload)
            .map(StreamEvent::Progress)
            .map_err(|e| ExtractionError::protocol(format!("Malformed progress event: {}", e))),
        EVENT_RESULT => serde_json::from_value::<ExtractionResult>(payload)
            .map(|result| StreamEvent::Result(Box::new(result)))
            .map_err(|e| ExtractionError::protocol(format!("Malformed result event: {}", e))),
        EVENT_ERROR => {
            let message = detail_from_value(&payload)
                .unwrap_or_else(|| EXTRACTION_FAILED_FALLBACK.to_string());
            Ok(StreamEvent::Failed(ExtractionError::request(message, None)))
        }
        other => Ok(StreamEvent::Ignored(other.to_string())),
    }
}
