use thiserror::Error;

/// Fallback when a failed response carries neither a detail nor a status text
pub const REQUEST_FAILED_FALLBACK: &str = "Metadata extraction request failed";

/// Fallback when the stream reports an `error` event without a usable detail
pub const EXTRACTION_FAILED_FALLBACK: &str = "Metadata extraction failed";

/// Fallback used by the non-streaming endpoints
pub const GENERIC_FALLBACK: &str = "An error occurred while extracting metadata";

pub const STREAM_ENDED_WITHOUT_RESULT: &str = "Stream ended without result";

/// Terminal failure of an extraction call.
///
/// `Display` is the user-facing message: the page renders it verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The server explicitly reported a failure.
    #[error("{message}")]
    Request { message: String, status: Option<u16> },

    /// The stream was malformed, empty, undecodable or ended prematurely.
    #[error("{message}")]
    Protocol { message: String },

    /// Network-level failure surfaced by the HTTP client.
    #[error("{message}")]
    Transport { message: String },

    /// The request could not be issued as given.
    #[error("Invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("Extraction cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Request,
    Protocol,
    Transport,
    InvalidRequest,
    Cancelled,
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ExtractionError>;

impl ExtractionError {
    pub fn request(message: impl Into<String>, status: Option<u16>) -> Self {
        ExtractionError::Request {
            message: message.into(),
            status,
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        ExtractionError::Protocol {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ExtractionError::Transport {
            message: message.into(),
        }
    }

    pub fn invalid_request(reason: impl Into<String>) -> Self {
        ExtractionError::InvalidRequest {
            reason: reason.into(),
        }
    }

    pub fn stream_ended() -> Self {
        Self::protocol(STREAM_ENDED_WITHOUT_RESULT)
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractionError::Request { .. } => ErrorKind::Request,
            ExtractionError::Protocol { .. } => ErrorKind::Protocol,
            ExtractionError::Transport { .. } => ErrorKind::Transport,
            ExtractionError::InvalidRequest { .. } => ErrorKind::InvalidRequest,
            ExtractionError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// HTTP status of the failed response, when the failure came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            ExtractionError::Request { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExtractionError::Cancelled)
    }
}

impl From<reqwest::Error> for ExtractionError {
    fn from(error: reqwest::Error) -> Self {
        ExtractionError::transport(error.to_string())
    }
}

/// Picks the best message for a failed response: server `detail` first, then
/// the HTTP status text, then `fallback`.
pub fn select_error_message(body: &[u8], status_text: &str, fallback: &str) -> String {
    if let Some(detail) = detail_from_body(body) {
        return detail;
    }
    let status_text = status_text.trim();
    if !status_text.is_empty() {
        return status_text.to_string();
    }
    fallback.to_string()
}

/// Extracts a non-empty string `detail` field from a JSON body
pub fn detail_from_body(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    detail_from_value(&value)
}

pub fn detail_from_value(value: &serde_json::Value) -> Option<String> {
    value
        .get("detail")
        .and_then(|detail| detail.as_str())
        .filter(|detail| !detail.is_empty())
        .map(|detail| detail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detail_takes_priority_over_status_text() {
        let body = br#"{"detail":"repo not found"}"#;
        assert_eq!(
            select_error_message(body, "Not Found", REQUEST_FAILED_FALLBACK),
            "repo not found"
        );
    }

    #[test]
    fn test_status_text_used_without_detail() {
        assert_eq!(
            select_error_message(b"<html>oops</html>", "Bad Gateway", REQUEST_FAILED_FALLBACK),
            "Bad Gateway"
        );
        // FastAPI validation errors carry a list, not a string
        let body = json!({"detail": [{"loc": ["query", "repo_url"]}]}).to_string();
        assert_eq!(
            select_error_message(body.as_bytes(), "Unprocessable Entity", REQUEST_FAILED_FALLBACK),
            "Unprocessable Entity"
        );
    }

    #[test]
    fn test_fallback_when_nothing_else_available() {
        assert_eq!(
            select_error_message(b"", "  ", REQUEST_FAILED_FALLBACK),
            REQUEST_FAILED_FALLBACK
        );
    }

    #[test]
    fn test_display_is_the_bare_message() {
        let error = ExtractionError::request("repo not found", Some(404));
        assert_eq!(error.to_string(), "repo not found");
        assert_eq!(error.status(), Some(404));
        assert_eq!(error.kind(), ErrorKind::Request);

        assert_eq!(ExtractionError::stream_ended().to_string(), STREAM_ENDED_WITHOUT_RESULT);
        assert_eq!(ExtractionError::stream_ended().kind(), ErrorKind::Protocol);
    }
}
