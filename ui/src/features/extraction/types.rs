// Core types for the extraction page - no dioxus imports needed here
use std::collections::VecDeque;

use crate::services::client::{
    ExtractionRequest, ExtractionResult, ProgressEvent, ProgressStatus, Schema,
};
use crate::services::errors::ClientResult;
use crate::utils::{validate_repo_url, RepoUrlValidation};

const MAX_CONSOLE_MESSAGES: usize = 10;

/// Labels for the steps the backend reports, in pipeline order
pub const KNOWN_STEPS: [(&str, &str); 5] = [
    ("platform", "Extracting from platform API (GitHub/GitLab)"),
    ("file_parsing", "Parsing repository files"),
    ("external_data", "Fetching external data (OpenAlex, Wayback)"),
    ("llm", "Extracting with LLM"),
    ("jsonld_build", "Building JSON-LD document"),
];

#[derive(Clone, PartialEq, Debug, Default)]
pub struct RepositoryForm {
    pub repo_url: String,
    pub schema: Schema,
    pub access_token: String,
    pub show_access_token: bool,
}

/// Latest known status of one backend step
#[derive(Clone, PartialEq, Debug)]
pub struct StepProgress {
    pub step: String,
    pub label: String,
    pub status: ProgressStatus,
}

impl StepProgress {
    pub fn is_completed(&self) -> bool {
        self.status == ProgressStatus::Completed
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum ExtractionAction {
    // Form actions
    SetRepoUrl(String),
    SetSchema(Schema),
    SetAccessToken(String),
    ToggleAccessTokenVisibility,

    // Run lifecycle
    StartExtraction,
    RecordProgress(ProgressEvent),
    SetResult(Box<ExtractionResult>),
    SetError(String),
    CancelExtraction,
    ClearResult,

    AddConsoleMessage(String),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ExtractionState {
    pub form: RepositoryForm,
    pub url_validation: RepoUrlValidation,
    pub is_extracting: bool,
    pub steps: Vec<StepProgress>,
    pub result: Option<ExtractionResult>,
    pub error: Option<String>,
    pub console_messages: VecDeque<String>,
}

impl Default for ExtractionState {
    fn default() -> Self {
        Self {
            form: RepositoryForm::default(),
            url_validation: RepoUrlValidation::Empty,
            is_extracting: false,
            steps: Vec::new(),
            result: None,
            error: None,
            console_messages: VecDeque::new(),
        }
    }
}

impl ExtractionState {
    pub fn reduce_in_place(&mut self, action: ExtractionAction) {
        match action {
            ExtractionAction::SetRepoUrl(url) => {
                self.url_validation = validate_repo_url(&url);
                self.form.repo_url = url;
            }
            ExtractionAction::SetSchema(schema) => {
                self.form.schema = schema;
            }
            ExtractionAction::SetAccessToken(token) => {
                self.form.access_token = token;
            }
            ExtractionAction::ToggleAccessTokenVisibility => {
                self.form.show_access_token = !self.form.show_access_token;
            }
            ExtractionAction::StartExtraction => {
                self.is_extracting = true;
                self.steps.clear();
                self.result = None;
                self.error = None;
            }
            ExtractionAction::RecordProgress(event) => {
                // Upsert: a step keeps the position where it first appeared
                match self.steps.iter_mut().find(|s| s.step == event.step) {
                    Some(existing) => {
                        existing.status = event.status;
                        existing.label = event.label;
                    }
                    None => self.steps.push(StepProgress {
                        step: event.step,
                        label: event.label,
                        status: event.status,
                    }),
                }
            }
            ExtractionAction::SetResult(result) => {
                self.is_extracting = false;
                self.result = Some(*result);
                self.error = None;
            }
            ExtractionAction::SetError(message) => {
                self.is_extracting = false;
                self.error = Some(message);
            }
            ExtractionAction::CancelExtraction => {
                self.is_extracting = false;
            }
            ExtractionAction::ClearResult => {
                self.result = None;
                self.error = None;
                self.steps.clear();
            }
            ExtractionAction::AddConsoleMessage(message) => {
                self.console_messages.push_back(message);
                while self.console_messages.len() > MAX_CONSOLE_MESSAGES {
                    self.console_messages.pop_front();
                }
            }
        }
    }

    /// Request for the current form contents
    pub fn build_request(&self) -> ClientResult<ExtractionRequest> {
        Ok(ExtractionRequest::new(self.form.repo_url.clone())?
            .with_schema(self.form.schema)
            .with_access_token(Some(self.form.access_token.clone())))
    }

    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_completed()).count()
    }

    /// Label of the most recently started step that has not completed yet
    pub fn active_step_label(&self) -> Option<&str> {
        self.steps
            .iter()
            .rev()
            .find(|s| !s.is_completed())
            .map(|s| s.label.as_str())
    }

    pub fn should_show_progress(&self) -> bool {
        self.is_extracting || !self.steps.is_empty()
    }
}

/// Display label for a step id, for steps the backend did not label
pub fn known_step_label(step: &str) -> Option<&'static str> {
    KNOWN_STEPS
        .iter()
        .find(|(id, _)| *id == step)
        .map(|(_, label)| *label)
}
