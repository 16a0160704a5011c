use futures_util::StreamExt;
use reqwest::Url;
use tracing::{debug, info, instrument, warn};

use super::types::{ExtractionRequest, ExtractionResult, ProgressEvent};
use crate::services::config::ExtractorConfig;
use crate::services::errors::{
    select_error_message, ClientResult, ExtractionError, REQUEST_FAILED_FALLBACK,
};
use crate::services::streaming::{
    interpret_frame, parse_frame, ByteStream, CancellationToken, ExtractionTransport,
    HttpTransport, SseFrameDecoder, StreamEvent, ACCEPT_EVENT_STREAM,
};

/// Progress callback, invoked synchronously once per progress frame
pub type ProgressCallback<'a> = &'a mut dyn FnMut(ProgressEvent);

/// Build `<endpoint>?repo_url=..&schema=..[&access_token=..]`
pub fn build_request_url(endpoint: &str, request: &ExtractionRequest) -> ClientResult<String> {
    Url::parse_with_params(endpoint, request.query_pairs())
        .map(|url| url.to_string())
        .map_err(|e| {
            ExtractionError::invalid_request(format!("invalid endpoint URL '{}': {}", endpoint, e))
        })
}

/// Client for the streaming extraction endpoint.
///
/// Each call owns its own decoder and parse buffer, so one client can serve
/// any number of concurrent extractions.
#[derive(Clone)]
pub struct StreamingExtractionClient<T = HttpTransport> {
    transport: T,
    config: ExtractorConfig,
}

impl StreamingExtractionClient<HttpTransport> {
    /// Create a client backed by reqwest
    pub fn from_config(config: ExtractorConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: ExtractionTransport> StreamingExtractionClient<T> {
    pub fn new(transport: T, config: ExtractorConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn stream_url(&self, request: &ExtractionRequest) -> ClientResult<String> {
        let endpoint = self.config.endpoint_url(&self.config.endpoints.stream);
        build_request_url(&endpoint, request)
    }

    /// Run one extraction to completion.
    ///
    /// Progress events reach `on_progress` in stream order, before the
    /// terminal outcome is returned.
    pub async fn extract(
        &self,
        request: &ExtractionRequest,
        on_progress: Option<ProgressCallback<'_>>,
    ) -> ClientResult<ExtractionResult> {
        self.extract_with_cancel(request, on_progress, &CancellationToken::new())
            .await
    }

    /// Like [`extract`](Self::extract), but stops as soon as `cancel` fires.
    /// The body stream is dropped on return, which releases the connection.
    #[instrument(skip_all, fields(repo_url = %request.repo_url(), schema = %request.schema()))]
    pub async fn extract_with_cancel(
        &self,
        request: &ExtractionRequest,
        on_progress: Option<ProgressCallback<'_>>,
        cancel: &CancellationToken,
    ) -> ClientResult<ExtractionResult> {
        let url = self.stream_url(request)?;
        info!("Opening extraction stream");

        let mut response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ExtractionError::Cancelled),
            response = self.transport.get(&url, ACCEPT_EVENT_STREAM) => response?,
        };

        if !response.is_success() {
            let body = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(ExtractionError::Cancelled),
                body = response.collect_body() => body.unwrap_or_default(),
            };
            let message = select_error_message(&body, &response.status_text, REQUEST_FAILED_FALLBACK);
            warn!(status = response.status, "Extraction request rejected: {}", message);
            return Err(ExtractionError::request(message, Some(response.status)));
        }

        let Some(body) = response.body.take() else {
            return Err(ExtractionError::protocol("Response has no readable body"));
        };

        let outcome = consume_stream(body, on_progress, cancel).await;
        match &outcome {
            Ok(result) => info!(status = %result.status, "Extraction finished"),
            Err(ExtractionError::Cancelled) => info!("Extraction cancelled"),
            Err(e) => warn!("Extraction failed: {}", e),
        }
        outcome
    }
}

/// The stream-consumption loop.
///
/// Alternates between awaiting the next chunk and draining every frame the
/// chunk completed. Returns on the first terminal frame, on end-of-data, on a
/// read error or on cancellation.
async fn consume_stream(
    mut body: ByteStream,
    mut on_progress: Option<ProgressCallback<'_>>,
    cancel: &CancellationToken,
) -> ClientResult<ExtractionResult> {
    let mut decoder = SseFrameDecoder::new();
    let mut progress_count = 0usize;

    loop {
        // Awaiting bytes
        let next = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(ExtractionError::Cancelled),
            next = body.next() => next,
        };

        let (blocks, end_of_data) = match next {
            Some(Ok(chunk)) => (decoder.feed(&chunk), false),
            Some(Err(e)) => {
                return Err(ExtractionError::protocol(format!("Stream interrupted: {}", e)));
            }
            None => (decoder.finish(), true),
        };

        // Parsing buffer
        for block in blocks {
            if cancel.is_cancelled() {
                return Err(ExtractionError::Cancelled);
            }

            let Some(frame) = parse_frame(&block) else {
                continue;
            };

            match interpret_frame(&frame)? {
                StreamEvent::Progress(event) => {
                    progress_count += 1;
                    debug!(step = %event.step, status = ?event.status, "progress");
                    if let Some(callback) = on_progress.as_deref_mut() {
                        callback(event);
                    }
                }
                StreamEvent::Result(result) => {
                    debug!(progress_count, "result frame received");
                    return Ok(*result);
                }
                StreamEvent::Failed(error) => return Err(error),
                StreamEvent::Ignored(name) => {
                    debug!("Ignoring '{}' event", name);
                }
            }
        }

        if end_of_data {
            if !decoder.buffered().trim().is_empty() {
                debug!(
                    "Discarding {} bytes of unterminated frame",
                    decoder.buffered().len()
                );
            }
            return Err(ExtractionError::stream_ended());
        }
    }
}
