use dioxus::prelude::*;

use crate::components::input::{InputType, ValidatedInput};
use crate::features::extraction::*;
use crate::services::client::Schema;
use crate::utils::{repo_url_validation_class, repo_url_validation_style, RepoUrlValidation};

#[derive(Props, PartialEq, Clone)]
pub struct ExtractionFormProps {
    pub state: Signal<ExtractionState>,
    pub dispatch: EventHandler<ExtractionAction>,
    pub on_submit: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

#[component]
pub fn ExtractionForm(props: ExtractionFormProps) -> Element {
    let state = props.state;
    let dispatch = props.dispatch;
    let is_extracting = state().is_extracting;
    let feedback_class = match state().url_validation {
        RepoUrlValidation::Supported(_) => "validation-feedback success",
        _ => "validation-feedback error",
    };

    rsx! {
        div {
            class: "extraction-form",

            h2 {
                class: "form-title",
                "Repository"
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Repository URL:"
                }
                ValidatedInput {
                    value: state().form.repo_url,
                    placeholder: "https://github.com/owner/repository".to_string(),
                    input_type: InputType::Url,
                    input_class: repo_url_validation_class(&state().url_validation).to_string(),
                    input_style: repo_url_validation_style(&state().url_validation).to_string(),
                    disabled: is_extracting,
                    on_change: move |url: String| {
                        dispatch.call(ExtractionAction::SetRepoUrl(url));
                    }
                }
                if let Some(message) = state().url_validation.message() {
                    div {
                        class: feedback_class,
                        "{message}"
                    }
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Metadata schema:"
                }
                select {
                    class: "input-field",
                    disabled: is_extracting,
                    value: "{state().form.schema.wire_token()}",
                    onchange: move |event| {
                        dispatch.call(ExtractionAction::SetSchema(Schema::normalize(&event.value())));
                    },
                    for schema in Schema::ALL {
                        option {
                            key: "{schema.wire_token()}",
                            value: "{schema.wire_token()}",
                            selected: state().form.schema == schema,
                            "{schema.display_name()}"
                        }
                    }
                }
            }

            div {
                class: "input-section",
                label {
                    class: "input-label",
                    "Access token (optional, for private repositories or higher rate limits):"
                }
                div {
                    class: "token-input-row",
                    ValidatedInput {
                        value: state().form.access_token,
                        placeholder: "ghp_... / glpat-...".to_string(),
                        input_type: if state().form.show_access_token { InputType::Text } else { InputType::Password },
                        input_class: "input-field".to_string(),
                        input_style: "".to_string(),
                        disabled: is_extracting,
                        on_change: move |token: String| {
                            dispatch.call(ExtractionAction::SetAccessToken(token));
                        }
                    }
                    button {
                        class: "toggle-button",
                        r#type: "button",
                        onclick: move |_| dispatch.call(ExtractionAction::ToggleAccessTokenVisibility),
                        if state().form.show_access_token { "Hide" } else { "Show" }
                    }
                }
            }

            div {
                class: "button-section",
                if is_extracting {
                    button {
                        class: "cancel-button",
                        onclick: move |_| props.on_cancel.call(()),
                        "Cancel"
                    }
                } else {
                    button {
                        class: "validate-button",
                        disabled: !validate_extraction_ready(&state()),
                        title: get_form_validation_message(&state()).unwrap_or_default(),
                        onclick: move |_| props.on_submit.call(()),
                        "Extract Metadata"
                    }
                }
            }
        }
    }
}
