use crate::features::extraction::types::*;
use crate::utils::RepoUrlValidation;

/// Validates that the form can start an extraction
pub fn validate_extraction_ready(state: &ExtractionState) -> bool {
    !state.is_extracting && state.url_validation.is_supported()
}

/// Gets user-friendly validation message for the current form state
pub fn get_form_validation_message(state: &ExtractionState) -> Option<String> {
    match &state.url_validation {
        RepoUrlValidation::Empty => Some("Please enter a repository URL".to_string()),
        RepoUrlValidation::Supported(_) => None,
        other => other.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_requires_supported_url() {
        let mut state = ExtractionState::default();
        assert!(!validate_extraction_ready(&state));
        assert_eq!(
            get_form_validation_message(&state).as_deref(),
            Some("Please enter a repository URL")
        );

        state.reduce_in_place(ExtractionAction::SetRepoUrl(
            "https://bitbucket.org/org/repo".to_string(),
        ));
        assert!(!validate_extraction_ready(&state));
        assert!(get_form_validation_message(&state).unwrap().contains("bitbucket.org"));

        state.reduce_in_place(ExtractionAction::SetRepoUrl(
            "https://github.com/org/repo".to_string(),
        ));
        assert!(validate_extraction_ready(&state));
        assert_eq!(get_form_validation_message(&state), None);
    }

    #[test]
    fn test_not_ready_while_extracting() {
        let mut state = ExtractionState::default();
        state.reduce_in_place(ExtractionAction::SetRepoUrl(
            "https://gitlab.com/group/project".to_string(),
        ));
        state.reduce_in_place(ExtractionAction::StartExtraction);
        assert!(!validate_extraction_ready(&state));
    }
}
