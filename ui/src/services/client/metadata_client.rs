use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};

use super::extraction_client::build_request_url;
use super::types::{
    ExtractionRequest, ExtractionResult, HealthStatus, PlatformInfo, PlatformsResponse,
};
use crate::services::config::ExtractorConfig;
use crate::services::errors::{
    detail_from_body, ClientResult, ExtractionError, GENERIC_FALLBACK,
};
use crate::services::streaming::{ExtractionTransport, HttpTransport, ACCEPT_JSON};

/// Request/response companion to the streaming client.
///
/// Every call is a single GET that returns one JSON document. Failures carry
/// the server's `detail` when there is one, otherwise the transport's own
/// description, otherwise a generic message.
#[derive(Clone)]
pub struct MetadataClient<T = HttpTransport> {
    transport: T,
    config: ExtractorConfig,
}

impl MetadataClient<HttpTransport> {
    pub fn from_config(config: ExtractorConfig) -> ClientResult<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: ExtractionTransport> MetadataClient<T> {
    pub fn new(transport: T, config: ExtractorConfig) -> Self {
        Self { transport, config }
    }

    /// Raw metadata document for a repository
    #[instrument(skip_all, fields(repo_url = %request.repo_url()))]
    pub async fn fetch_metadata(
        &self,
        request: &ExtractionRequest,
    ) -> ClientResult<serde_json::Value> {
        let url = build_request_url(
            &self.config.endpoint_url(&self.config.endpoints.metadata),
            request,
        )?;
        self.get_json(&url).await
    }

    /// Metadata plus per-property annotations
    #[instrument(skip_all, fields(repo_url = %request.repo_url()))]
    pub async fn fetch_enriched(
        &self,
        request: &ExtractionRequest,
    ) -> ClientResult<ExtractionResult> {
        let url = build_request_url(
            &self.config.endpoint_url(&self.config.endpoints.enriched),
            request,
        )?;
        self.get_json(&url).await
    }

    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.config.endpoint_url(&self.config.endpoints.health);
        self.get_json(&url).await
    }

    /// Hosting platforms the backend can extract from
    pub async fn platforms(&self) -> ClientResult<Vec<PlatformInfo>> {
        let url = self.config.endpoint_url(&self.config.endpoints.platforms);
        let response: PlatformsResponse = self.get_json(&url).await?;
        Ok(response.platforms)
    }

    async fn get_json<R: DeserializeOwned>(&self, url: &str) -> ClientResult<R> {
        let mut response = self.transport.get(url, ACCEPT_JSON).await.map_err(|e| {
            error!("Request to {} failed: {}", url, e);
            if e.to_string().trim().is_empty() {
                ExtractionError::transport(GENERIC_FALLBACK)
            } else {
                e
            }
        })?;

        let body = response.collect_body().await.map_err(|e| {
            ExtractionError::transport(format!("Failed to read response body: {}", e))
        })?;

        if !response.is_success() {
            let message = detail_from_body(&body).unwrap_or_else(|| {
                format!("Request failed with status code {}", response.status)
            });
            error!(status = response.status, "{} returned an error: {}", url, message);
            return Err(ExtractionError::request(message, Some(response.status)));
        }

        debug!("{} returned {} bytes", url, body.len());
        serde_json::from_slice(&body).map_err(|e| {
            ExtractionError::protocol(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}
