use dioxus::prelude::*;
use ui::{ExtractorConfig, ExtractorService};

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Backend location is fixed at build time and shared with every page
    use_context_provider(ExtractorConfig::from_env);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Title { "maSMP Metadata Extractor" }

        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

#[component]
fn Home() -> Element {
    rsx! {
        div {
            ExtractorService {}
        }
    }
}
