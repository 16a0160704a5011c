// Wire types for the metadata extraction API - no dioxus imports needed here
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::services::errors::{ClientResult, ExtractionError};

/// Target metadata vocabulary requested from the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Schema {
    #[default]
    #[serde(rename = "maSMP")]
    MaSmp,
    #[serde(rename = "CODEMETA", alias = "CodeMeta")]
    CodeMeta,
}

impl Schema {
    pub const ALL: [Schema; 2] = [Schema::MaSmp, Schema::CodeMeta];

    /// Token the backend expects in the `schema` query parameter
    pub fn wire_token(&self) -> &'static str {
        match self {
            Schema::MaSmp => "maSMP",
            Schema::CodeMeta => "CODEMETA",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Schema::MaSmp => "maSMP",
            Schema::CodeMeta => "CodeMeta",
        }
    }

    /// Maps any user-facing value to a schema. Only CodeMeta spellings select
    /// CodeMeta; everything else falls back to maSMP.
    pub fn normalize(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("codemeta") {
            Schema::CodeMeta
        } else {
            Schema::MaSmp
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One extraction request. Fields are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    repo_url: String,
    schema: Schema,
    access_token: Option<String>,
}

impl ExtractionRequest {
    /// Create a request for `repo_url` with the default schema
    pub fn new(repo_url: impl Into<String>) -> ClientResult<Self> {
        let repo_url = repo_url.into().trim().to_string();
        if repo_url.is_empty() {
            return Err(ExtractionError::invalid_request("repository URL is required"));
        }
        Ok(Self {
            repo_url,
            schema: Schema::default(),
            access_token: None,
        })
    }

    pub fn with_schema(mut self, schema: Schema) -> Self {
        self.schema = schema;
        self
    }

    /// Blank tokens are treated as absent
    pub fn with_access_token(mut self, access_token: Option<String>) -> Self {
        self.access_token = access_token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());
        self
    }

    pub fn repo_url(&self) -> &str {
        &self.repo_url
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Query parameters in the order the backend documents them
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![
            ("repo_url", self.repo_url.as_str()),
            ("schema", self.schema.wire_token()),
        ];
        if let Some(token) = self.access_token() {
            pairs.push(("access_token", token));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStatus {
    Started,
    Completed,
}

/// Progress notification for one backend extraction step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProgressPayload")]
pub struct ProgressEvent {
    pub step: String,
    pub status: ProgressStatus,
    pub label: String,
}

#[derive(Deserialize)]
struct ProgressPayload {
    step: String,
    status: ProgressStatus,
    #[serde(default)]
    label: Option<String>,
}

impl From<ProgressPayload> for ProgressEvent {
    fn from(payload: ProgressPayload) -> Self {
        let label = payload
            .label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| payload.step.clone());
        Self {
            step: payload.step,
            status: payload.status,
            label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Required,
    Recommended,
    Optional,
}

impl PropertyCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyCategory::Required => "required",
            PropertyCategory::Recommended => "recommended",
            PropertyCategory::Optional => "optional",
        }
    }
}

/// Where a property value came from: one source or several
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertySource {
    Single(String),
    Multiple(Vec<String>),
}

impl PropertySource {
    pub fn sources(&self) -> Vec<&str> {
        match self {
            PropertySource::Single(source) => vec![source.as_str()],
            PropertySource::Multiple(sources) => sources.iter().map(String::as_str).collect(),
        }
    }
}

impl fmt::Display for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sources().join(", "))
    }
}

/// Per-property annotation returned next to the JSON-LD document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnrichedProperty {
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: Option<PropertySource>,
    #[serde(default)]
    pub category: Option<PropertyCategory>,
}

/// profile -> property -> annotation
pub type EnrichedMetadata = BTreeMap<String, BTreeMap<String, EnrichedProperty>>;

/// Terminal payload of a successful extraction
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub code_url: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub results: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub enriched_metadata: EnrichedMetadata,
}

impl ExtractionResult {
    /// Number of annotated properties across all profiles
    pub fn enriched_property_count(&self) -> usize {
        self.enriched_metadata.values().map(|props| props.len()).sum()
    }

    /// Pretty-printed JSON-LD document, as offered for download
    pub fn results_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.results).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    pub name: String,
    pub url_pattern: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PlatformsResponse {
    pub platforms: Vec<PlatformInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_wire_tokens() {
        assert_eq!(Schema::MaSmp.wire_token(), "maSMP");
        assert_eq!(Schema::CodeMeta.wire_token(), "CODEMETA");
        assert_eq!(Schema::default(), Schema::MaSmp);
    }

    #[test]
    fn test_schema_normalize() {
        assert_eq!(Schema::normalize("CodeMeta"), Schema::CodeMeta);
        assert_eq!(Schema::normalize("CODEMETA"), Schema::CodeMeta);
        assert_eq!(Schema::normalize("maSMP"), Schema::MaSmp);
        assert_eq!(Schema::normalize("schema.org"), Schema::MaSmp);
        assert_eq!(Schema::normalize(""), Schema::MaSmp);
    }

    #[test]
    fn test_request_rejects_blank_url() {
        let err = ExtractionRequest::new("   ").unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidRequest { .. }));
    }

    #[test]
    fn test_request_query_pairs() {
        let request = ExtractionRequest::new(" https://github.com/org/repo ")
            .unwrap()
            .with_schema(Schema::CodeMeta)
            .with_access_token(Some("ghp_token".to_string()));

        assert_eq!(
            request.query_pairs(),
            vec![
                ("repo_url", "https://github.com/org/repo"),
                ("schema", "CODEMETA"),
                ("access_token", "ghp_token"),
            ]
        );

        let anonymous = ExtractionRequest::new("https://github.com/org/repo")
            .unwrap()
            .with_access_token(Some("  ".to_string()));
        assert_eq!(anonymous.access_token(), None);
        assert_eq!(anonymous.query_pairs().len(), 2);
    }

    #[test]
    fn test_progress_label_defaults_to_step() {
        let event: ProgressEvent =
            serde_json::from_value(json!({"step": "fetch", "status": "started"})).unwrap();
        assert_eq!(event.label, "fetch");
        assert_eq!(event.status, ProgressStatus::Started);

        let event: ProgressEvent = serde_json::from_value(json!({
            "event": "progress",
            "step": "llm",
            "status": "completed",
            "label": "Extracting with LLM"
        }))
        .unwrap();
        assert_eq!(event.label, "Extracting with LLM");
        assert_eq!(event.status, ProgressStatus::Completed);
    }

    #[test]
    fn test_progress_rejects_unknown_status() {
        let parsed = serde_json::from_value::<ProgressEvent>(json!({
            "step": "llm",
            "status": "exploded"
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_extraction_result_full_payload() {
        let result: ExtractionResult = serde_json::from_value(json!({
            "status": "success",
            "schema": "maSMP",
            "code_url": "https://github.com/org/repo",
            "message": "Code analysis completed.",
            "results": {"maSMP:SoftwareSourceCode": {"name": "repo"}},
            "enriched_metadata": {
                "maSMP:SoftwareSourceCode": {
                    "name": {"confidence": 0.9, "source": "GitHub API", "category": "required"},
                    "keywords": {"confidence": null, "source": ["README", "LLM"], "category": null}
                }
            }
        }))
        .unwrap();

        assert_eq!(result.status, "success");
        assert_eq!(result.enriched_property_count(), 2);
        let profile = &result.enriched_metadata["maSMP:SoftwareSourceCode"];
        assert_eq!(profile["name"].category, Some(PropertyCategory::Required));
        assert_eq!(
            profile["keywords"].source,
            Some(PropertySource::Multiple(vec!["README".into(), "LLM".into()]))
        );
        assert_eq!(profile["keywords"].source.as_ref().unwrap().to_string(), "README, LLM");
    }

    #[test]
    fn test_extraction_result_minimal_payload() {
        let result: ExtractionResult = serde_json::from_value(json!({"status": "ok"})).unwrap();
        assert_eq!(result.status, "ok");
        assert!(result.results.is_empty());
        assert!(result.enriched_metadata.is_empty());
    }
}
