use crate::api::{Catalog, CatalogStatus, Release};
use crate::components::release_modal::ModalController;
use crate::components::Icon;
use dioxus::prelude::*;

pub const EMPTY_CATALOG_MESSAGE: &str = "No tapes found.";
pub const CATALOG_ERROR_MESSAGE: &str = "Error loading tapes. See console for details.";

/// Grid of release tiles, or the placeholder for the current load status.
#[component]
pub fn ReleaseGallery(controller: ModalController) -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let status = use_context::<Signal<CatalogStatus>>();
    let releases: Vec<Release> = catalog.read().iter().cloned().collect();

    let content = match status() {
        CatalogStatus::Loading => rsx! {
            div { class: "gallery-placeholder",
                Icon { name: "loader".to_string(), class: "icon spin".to_string() }
            }
        },
        CatalogStatus::Empty => rsx! {
            p { class: "gallery-placeholder", "{EMPTY_CATALOG_MESSAGE}" }
        },
        CatalogStatus::Failed => rsx! {
            p { class: "gallery-placeholder error", "{CATALOG_ERROR_MESSAGE}" }
        },
        CatalogStatus::Ready => rsx! {
            for release in releases {
                ReleaseTile {
                    key: "{release.id}",
                    release: release.clone(),
                    onclick: {
                        let mut controller = controller;
                        let release_id = release.id.clone();
                        move |_| controller.open(&release_id)
                    },
                }
            }
        },
    };

    rsx! {
        section { id: "releases-grid", class: "releases-grid", {content} }
    }
}

#[component]
pub fn ReleaseTile(release: Release, onclick: EventHandler<MouseEvent>) -> Element {
    rsx! {
        div {
            class: "release-item",
            "data-release-id": "{release.id}",
            onclick: move |e| onclick.call(e),
            img {
                src: "{release.image_url}",
                alt: "{release.cover_alt()}",
                loading: "lazy",
                decoding: "async",
            }
            h3 { "{release.title}" }
            p { "{release.catalog_info}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::audio_manager::test_support::release;
    use crate::components::release_modal::ModalState;
    use crate::components::test_dom::{count, TestDom};

    fn gallery_app() -> Element {
        let state = use_context::<Signal<ModalState>>();
        let catalog = use_context::<Signal<Catalog>>();
        rsx! {
            ReleaseGallery { controller: ModalController::new(state, catalog) }
        }
    }

    fn render(catalog: Catalog, status: CatalogStatus) -> String {
        TestDom::mount(gallery_app, catalog, status).html()
    }

    #[test]
    fn empty_catalog_shows_placeholder() {
        let html = render(Catalog::default(), CatalogStatus::Empty);
        assert!(html.contains(EMPTY_CATALOG_MESSAGE));
        assert!(!html.contains(CATALOG_ERROR_MESSAGE));
        assert_eq!(count(&html, "data-release-id"), 0);
    }

    #[test]
    fn failed_load_shows_static_error() {
        let html = render(Catalog::default(), CatalogStatus::Failed);
        assert!(html.contains(CATALOG_ERROR_MESSAGE));
        assert!(!html.contains(EMPTY_CATALOG_MESSAGE));
    }

    #[test]
    fn loading_shows_neither_message() {
        let html = render(Catalog::default(), CatalogStatus::Loading);
        assert!(!html.contains(EMPTY_CATALOG_MESSAGE));
        assert!(!html.contains(CATALOG_ERROR_MESSAGE));
        assert!(html.contains("releases-grid"));
    }

    #[test]
    fn one_tile_per_release_in_fetch_order() {
        let catalog = Catalog::from_releases(vec![
            release("c", 1),
            release("a", 2),
            release("a", 3),
            release("b", 1),
        ]);
        let html = render(catalog, CatalogStatus::Ready);

        assert_eq!(count(&html, "data-release-id="), 3);
        for id in ["a", "b", "c"] {
            assert_eq!(count(&html, &format!(r#"data-release-id="{id}""#)), 1, "{id}");
        }
        let c = html.find(r#"data-release-id="c""#);
        let a = html.find(r#"data-release-id="a""#);
        let b = html.find(r#"data-release-id="b""#);
        assert!(c < a && a < b);
        assert!(html.contains(r#"alt="Album cover for Tape a""#));
        assert!(html.contains(r#"loading="lazy""#));
    }
}
