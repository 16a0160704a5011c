//! Runtime configuration for the extractor front-end
//!
//! The configuration is built once at startup and handed to the page through
//! the Dioxus context; nothing in the services layer reads global state.

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Base URL of the extraction backend, without trailing slash
    pub api_base: String,
    pub endpoints: EndpointConfig,
    pub user_agent: String,
    /// Request timeout applied by the HTTP client on native targets.
    /// Browsers enforce their own limits.
    pub request_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub metadata: String,
    pub enriched: String,
    pub stream: String,
    pub health: String,
    pub platforms: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            metadata: "/api/metadata".to_string(),
            enriched: "/api/metadata/enriched".to_string(),
            stream: "/api/metadata/stream".to_string(),
            health: "/api/health".to_string(),
            platforms: "/api/platforms".to_string(),
        }
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            endpoints: EndpointConfig::default(),
            user_agent: "masmp-metadata-extractor/0.1".to_string(),
            request_timeout_ms: None,
        }
    }
}

impl ExtractorConfig {
    /// Configuration for `api_base`, everything else default
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            ..Self::default()
        }
    }

    /// Build from `API_BASE_URL`, read at compile time so the value is baked
    /// into the WASM bundle the same way on every target.
    pub fn from_env() -> Self {
        match option_env!("API_BASE_URL") {
            Some(base) if !base.trim().is_empty() => Self::with_api_base(base),
            _ => Self::default(),
        }
    }

    /// Absolute URL for an endpoint path
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}{}", normalize_base(&self.api_base), path)
    }

    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let base = self.api_base.trim();
        if base.is_empty() {
            errors.push("api_base must not be empty".to_string());
        } else if !(base.starts_with("http://") || base.starts_with("https://")) {
            errors.push(format!("api_base must be an http(s) URL, got '{}'", base));
        }

        for (name, path) in [
            ("metadata", &self.endpoints.metadata),
            ("enriched", &self.endpoints.enriched),
            ("stream", &self.endpoints.stream),
            ("health", &self.endpoints.health),
            ("platforms", &self.endpoints.platforms),
        ] {
            if !path.starts_with('/') {
                errors.push(format!("endpoint '{}' must start with '/', got '{}'", name, path));
            }
        }

        if self.request_timeout_ms == Some(0) {
            errors.push("request_timeout_ms must be greater than 0".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
