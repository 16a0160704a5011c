use dioxus::prelude::*;

use crate::components::display::LoadingIndicator;
use crate::features::extraction::{StepProgress, KNOWN_STEPS};

#[derive(Props, PartialEq, Clone)]
pub struct ProgressDisplayProps {
    pub steps: Vec<StepProgress>,
    pub is_extracting: bool,
}

#[component]
pub fn ProgressDisplay(props: ProgressDisplayProps) -> Element {
    let completed = props.steps.iter().filter(|s| s.is_completed()).count();
    // The backend may report steps beyond the known pipeline
    let total = props.steps.len().max(KNOWN_STEPS.len());
    let progress_percentage = (completed as f64 / total as f64) * 100.0;

    let active_label = props
        .steps
        .iter()
        .rev()
        .find(|s| !s.is_completed())
        .map(|s| s.label.clone());

    rsx! {
        div {
            class: "extraction-progress-container",

            h4 {
                class: "extraction-progress-title",
                "Extraction Progress"
            }

            div {
                class: "progress-bar-container",
                div {
                    class: "progress-bar-background",
                    div {
                        class: "progress-bar-fill",
                        style: format!("width: {}%", progress_percentage),
                    }
                }
                span {
                    class: "progress-percentage",
                    "{completed}/{total}"
                }
            }

            if props.is_extracting {
                LoadingIndicator {
                    message: active_label.unwrap_or_else(|| "Connecting to extraction service...".to_string())
                }
            }

            ul {
                class: "step-list",
                for step in props.steps.iter() {
                    li {
                        key: "{step.step}",
                        class: if step.is_completed() { "step-item completed" } else { "step-item started" },
                        span {
                            class: "step-status-icon",
                            if step.is_completed() { "✓" } else { "…" }
                        }
                        span {
                            class: "step-label",
                            "{step.label}"
                        }
                    }
                }
            }
        }
    }
}
