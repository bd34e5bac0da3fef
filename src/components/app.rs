use crate::api::*;
use crate::components::audio_manager::{new_player_engine, AudioController, PlayerSignal};
use crate::components::release_modal::{ModalController, ModalState, ReleaseModal};
use crate::components::web::listen_for_escape;
use crate::components::{Player, ReleaseGallery};
use crate::config::AppConfig;
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
use dioxus::logger::tracing::error;
use dioxus::prelude::*;

/// Owns every piece of session state and hands it to the renderers through context.
#[component]
pub fn AppShell() -> Element {
    let config = use_context_provider(AppConfig::default);
    let mut catalog = use_signal(Catalog::default);
    let mut status = use_signal(CatalogStatus::default);
    let modal_state = use_signal(ModalState::default);
    let engine = use_signal(|| new_player_engine(&config));
    let modal = ModalController::new(modal_state, catalog);

    use_context_provider(|| catalog);
    use_context_provider(|| status);
    use_context_provider(|| modal_state);
    use_context_provider(|| PlayerSignal(engine));

    // Fetch the catalog once on mount; failures only affect the gallery
    let catalog_url = config.catalog_url.clone();
    use_effect(move || {
        let url = catalog_url.clone();
        spawn(async move {
            let result = load_catalog(&url).await;
            if let Err(err) = &result {
                error!("Could not load releases: {}", err);
            }
            let next_status = CatalogStatus::from_load(&result);
            if let Ok(loaded) = result {
                catalog.set(loaded);
            }
            status.set(next_status);
        });
    });

    // Escape closes the modal while it is visible
    use_effect(move || {
        #[cfg(target_arch = "wasm32")]
        let runtime = Runtime::current();
        let mut modal = modal;
        listen_for_escape(move || {
            #[cfg(target_arch = "wasm32")]
            let _guard = RuntimeGuard::new(runtime.clone());
            modal.close();
        });
    });

    rsx! {
        div { class: "app-container",
            header { class: "site-header",
                h1 { class: "site-title", "Tapeshelf" }
            }

            main { class: "main-scroll",
                ReleaseGallery { controller: modal }
            }

            ReleaseModal { controller: modal }

            // Fixed bottom player
            Player {}
        }

        // Audio controller - manages playback separately from UI
        AudioController {}
    }
}
