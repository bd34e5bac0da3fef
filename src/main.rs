use dioxus::prelude::*;

mod api;
mod components;
mod config;

use components::AppShell;

const FAVICON: Asset = asset!("/assets/favicon.svg");
const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Link { rel: "icon", r#type: "image/svg+xml", href: FAVICON }

        // Theme color for mobile browsers
        document::Meta { name: "theme-color", content: "#1b1712" }

        document::Stylesheet { href: APP_CSS }

        AppShell {}
    }
}
