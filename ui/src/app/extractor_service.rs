use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

use crate::components::display::{LoadingIndicator, MetadataDisplay, ProgressDisplay};
use crate::components::forms::ExtractionForm;
use crate::features::extraction::{ExtractionAction, ExtractionState};
use crate::services::client::{HealthStatus, PlatformInfo};
use crate::services::config::ExtractorConfig;
use crate::services::streaming::CancellationToken;
use crate::{console_info, console_warn};

#[cfg(feature = "web")]
use crate::features::extraction::execute_extraction;
#[cfg(feature = "web")]
use crate::services::client::{MetadataClient, StreamingExtractionClient};

const EXTRACTOR_SERVICE_CSS: Asset = asset!("/assets/styling/extractor_service.css");

#[derive(Clone, PartialEq, Debug)]
struct BackendStatus {
    health: Result<HealthStatus, String>,
    platforms: Vec<PlatformInfo>,
}

async fn check_backend(config: ExtractorConfig) -> BackendStatus {
    #[cfg(feature = "web")]
    {
        let client = match MetadataClient::from_config(config) {
            Ok(client) => client,
            Err(e) => {
                return BackendStatus {
                    health: Err(e.to_string()),
                    platforms: Vec::new(),
                }
            }
        };
        let health = client.health().await.map_err(|e| e.to_string());
        let platforms = match &health {
            Ok(_) => client.platforms().await.unwrap_or_default(),
            Err(_) => Vec::new(),
        };
        BackendStatus { health, platforms }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config;
        BackendStatus {
            health: Err("Backend checks are only available in the web build".to_string()),
            platforms: Vec::new(),
        }
    }
}

/// Cancel whatever run is registered in `slot`
fn cancel_active_run(slot: &Rc<RefCell<Option<CancellationToken>>>) -> bool {
    match slot.borrow_mut().take() {
        Some(token) => {
            token.cancel();
            true
        }
        None => false,
    }
}

#[component]
pub fn ExtractorService() -> Element {
    let config = use_context::<ExtractorConfig>();
    let mut state = use_signal(ExtractionState::default);

    // Token of the in-flight run. Not a signal: it must stay readable while
    // the component is being torn down.
    let active_run = use_hook(|| Rc::new(RefCell::new(None::<CancellationToken>)));

    {
        let active_run = active_run.clone();
        use_drop(move || {
            if cancel_active_run(&active_run) {
                console_info!("[Extractor] Page closed, in-flight extraction cancelled");
            }
        });
    }

    let backend_status = {
        let config = config.clone();
        use_resource(move || check_backend(config.clone()))
    };

    // Dispatch function for actions - using in-place reduction to preserve Dioxus Signal reactivity
    let dispatch = EventHandler::new(move |action: ExtractionAction| {
        state.with_mut(|s| {
            s.reduce_in_place(action);
        });
    });

    let on_submit = {
        let active_run = active_run.clone();
        let config = config.clone();
        move |_: ()| {
            let request = match state.peek().build_request() {
                Ok(request) => request,
                Err(e) => {
                    dispatch.call(ExtractionAction::SetError(e.to_string()));
                    return;
                }
            };

            let token = CancellationToken::new();
            if let Some(previous) = active_run.borrow_mut().replace(token.clone()) {
                previous.cancel();
            }

            let config = config.clone();
            spawn(async move {
                #[cfg(feature = "web")]
                {
                    match StreamingExtractionClient::from_config(config) {
                        Ok(client) => {
                            execute_extraction(&client, request, &token, |action| {
                                dispatch.call(action)
                            })
                            .await;
                        }
                        Err(e) => dispatch.call(ExtractionAction::SetError(e.to_string())),
                    }
                }

                #[cfg(not(feature = "web"))]
                {
                    let _ = (config, request, token);
                    dispatch.call(ExtractionAction::SetError(
                        "Extraction is only available in the web build".to_string(),
                    ));
                }
            });
        }
    };

    let on_cancel = {
        let active_run = active_run.clone();
        move |_: ()| {
            if cancel_active_run(&active_run) {
                console_warn!("[Extractor] Extraction cancelled by user");
            }
            dispatch.call(ExtractionAction::CancelExtraction);
        }
    };

    rsx! {
        document::Link { rel: "stylesheet", href: EXTRACTOR_SERVICE_CSS }

        div {
            class: "extractor-service-container",

            div {
                class: "title-container",
                h1 {
                    class: "extractor-title",
                    "maSMP Metadata Extractor"
                }
                p {
                    class: "extractor-subtitle",
                    "Extract maSMP or CodeMeta JSON-LD metadata from a GitHub or GitLab repository."
                }
            }

            // Backend status banner
            {match &*backend_status.read_unchecked() {
                None => rsx! {
                    LoadingIndicator { message: "Checking extraction service...".to_string() }
                },
                Some(BackendStatus { health: Ok(health), platforms }) => rsx! {
                    div {
                        class: if health.is_healthy() { "backend-status healthy" } else { "backend-status degraded" },
                        "Extraction service: {health.status}"
                        if !platforms.is_empty() {
                            span {
                                class: "platform-list",
                                " · Supported platforms: "
                                {platforms.iter().map(|p| p.name.clone()).collect::<Vec<_>>().join(", ")}
                            }
                        }
                    }
                },
                Some(BackendStatus { health: Err(message), .. }) => rsx! {
                    div {
                        class: "backend-status unavailable",
                        "⚠️ Extraction service unreachable: {message}"
                    }
                },
            }}

            ExtractionForm {
                state: state,
                dispatch: dispatch,
                on_submit: on_submit,
                on_cancel: on_cancel,
            }

            if state().should_show_progress() {
                ProgressDisplay {
                    steps: state().steps,
                    is_extracting: state().is_extracting,
                }
            }

            if let Some(error) = state().error {
                div {
                    class: "validation-result error",
                    "✗ {error}"
                }
            }

            if let Some(result) = state().result {
                MetadataDisplay { result: result }
                div {
                    class: "button-section",
                    button {
                        class: "secondary-button",
                        onclick: move |_| dispatch.call(ExtractionAction::ClearResult),
                        "Clear"
                    }
                }
            }

            if !state().console_messages.is_empty() {
                details {
                    class: "console-log",
                    summary { "Activity log" }
                    ul {
                        for (index, message) in state().console_messages.into_iter().enumerate() {
                            li { key: "{index}", "{message}" }
                        }
                    }
                }
            }
        }
    }
}
