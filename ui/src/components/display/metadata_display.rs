use dioxus::prelude::*;

use crate::services::client::{EnrichedProperty, ExtractionResult, PropertyCategory};

#[derive(Props, PartialEq, Clone)]
pub struct MetadataDisplayProps {
    pub result: ExtractionResult,
}

/// Properties of one profile, optionally restricted to a category
pub fn filter_properties(
    properties: &std::collections::BTreeMap<String, EnrichedProperty>,
    category: Option<PropertyCategory>,
) -> Vec<(String, EnrichedProperty)> {
    properties
        .iter()
        .filter(|(_, prop)| category.is_none() || prop.category == category)
        .map(|(name, prop)| (name.clone(), prop.clone()))
        .collect()
}

fn confidence_text(prop: &EnrichedProperty) -> String {
    match prop.confidence {
        Some(confidence) => format!("{:.0}%", confidence * 100.0),
        None => "-".to_string(),
    }
}

#[component]
pub fn MetadataDisplay(props: MetadataDisplayProps) -> Element {
    let mut category_filter = use_signal(|| None::<PropertyCategory>);
    let result = &props.result;
    let document = result.results_pretty();

    rsx! {
        div {
            class: "metadata-result-container",

            div {
                class: "validation-result success",
                div {
                    style: "font-weight: bold; margin-bottom: 8px;",
                    "✓ Extraction {result.status}"
                }
                if !result.message.is_empty() {
                    div { "{result.message}" }
                }
                if !result.code_url.is_empty() {
                    div {
                        "Repository: "
                        a {
                            href: "{result.code_url}",
                            target: "_blank",
                            "{result.code_url}"
                        }
                    }
                }
                if !result.schema.is_empty() {
                    div { "Schema: {result.schema}" }
                }
            }

            if !result.enriched_metadata.is_empty() {
                div {
                    class: "enriched-metadata-section",
                    h4 {
                        class: "section-title",
                        "Property Annotations ({result.enriched_property_count()})"
                    }

                    div {
                        class: "category-filter",
                        button {
                            class: if category_filter().is_none() { "filter-button active" } else { "filter-button" },
                            onclick: move |_| category_filter.set(None),
                            "All"
                        }
                        for category in [PropertyCategory::Required, PropertyCategory::Recommended, PropertyCategory::Optional] {
                            button {
                                key: "{category.as_str()}",
                                class: if category_filter() == Some(category) { "filter-button active" } else { "filter-button" },
                                onclick: move |_| category_filter.set(Some(category)),
                                "{category.as_str()}"
                            }
                        }
                    }

                    for (profile, properties) in result.enriched_metadata.iter() {
                        div {
                            key: "{profile}",
                            class: "profile-section",
                            h5 { class: "profile-title", "{profile}" }
                            table {
                                class: "property-table",
                                thead {
                                    tr {
                                        th { "Property" }
                                        th { "Category" }
                                        th { "Confidence" }
                                        th { "Source" }
                                    }
                                }
                                tbody {
                                    for (name, prop) in filter_properties(properties, category_filter()) {
                                        tr {
                                            key: "{name}",
                                            td { "{name}" }
                                            td { {prop.category.map(|c| c.as_str()).unwrap_or("-")} }
                                            td { {confidence_text(&prop)} }
                                            td { {prop.source.as_ref().map(|s| s.to_string()).unwrap_or_default()} }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            div {
                class: "jsonld-section",
                h4 { class: "section-title", "JSON-LD Document" }
                pre {
                    class: "jsonld-output",
                    "{document}"
                }
            }
        }
    }
}
