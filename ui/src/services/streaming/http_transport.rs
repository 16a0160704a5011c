//! reqwest-backed transport. The same code runs natively and in the browser,
//! where reqwest delegates to `fetch` and exposes the body as a byte stream.

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, error};

use super::traits::{ByteStream, ExtractionTransport, TransportResponse};
use crate::services::config::ExtractorConfig;
use crate::services::errors::{ClientResult, ExtractionError};

#[derive(Clone)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    /// Create a transport configured from `config`
    pub fn new(config: &ExtractorConfig) -> ClientResult<Self> {
        let builder = Client::builder().user_agent(config.user_agent.clone());

        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout_ms {
            Some(ms) => builder.timeout(std::time::Duration::from_millis(ms)),
            None => builder,
        };

        let http_client = builder.build().map_err(|e| {
            ExtractionError::transport(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { http_client })
    }
}

#[async_trait(?Send)]
impl ExtractionTransport for HttpTransport {
    async fn get(&self, url: &str, accept: &str) -> ClientResult<TransportResponse> {
        debug!("GET {} (accept: {})", url, accept);

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| {
                error!("Request to {} failed: {}", url, e);
                ExtractionError::from(e)
            })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        let body: ByteStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(|e| e.to_string())),
        );

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text,
            body: Some(body),
        })
    }
}
