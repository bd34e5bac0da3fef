// Release detail modal: state, controller, and the overlay view.
use crate::api::{track_number_label, Catalog, Release};
use crate::components::audio_manager::{MediaElement, PlaybackEngine, PlaybackResult, PlayerSignal};
use crate::components::web::set_page_scroll_locked;
use crate::components::Icon;
use dioxus::logger::tracing::{debug, warn};
use dioxus::prelude::*;

/// Which release the modal shows and whether it is on screen. The binding
/// survives closing so the last release can be reopened cheaply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModalState {
    bound: Option<String>,
    visible: bool,
}

impl ModalState {
    /// Binds and shows `release_id`. Unknown ids leave the state as it was.
    pub fn open(&mut self, catalog: &Catalog, release_id: &str) -> bool {
        if catalog.get(release_id).is_none() {
            return false;
        }
        self.bound = Some(release_id.to_string());
        self.visible = true;
        true
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn bound_release(&self) -> Option<&str> {
        self.bound.as_deref()
    }

    /// The bound release, but only while the modal is showing.
    pub fn visible_release(&self) -> Option<&str> {
        if self.visible {
            self.bound_release()
        } else {
            None
        }
    }
}

/// Starts the bound release's full tracklist at `track_index`.
///
/// Returns `Ok(false)` when nothing is bound or the binding no longer
/// resolves; that only happens with a stale view and is not an error.
pub fn play_from_modal<M: MediaElement>(
    modal: &ModalState,
    catalog: &Catalog,
    engine: &mut PlaybackEngine<M>,
    track_index: usize,
) -> PlaybackResult<bool> {
    let Some(release) = modal.bound_release().and_then(|id| catalog.get(id)) else {
        return Ok(false);
    };
    engine.build_playlist(release, track_index)?;
    Ok(true)
}

/// Open/close entry point shared by the gallery, the overlay and the Escape key.
#[derive(Clone, Copy)]
pub struct ModalController {
    state: Signal<ModalState>,
    catalog: Signal<Catalog>,
    lock_scroll: fn(bool),
}

impl PartialEq for ModalController {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.catalog == other.catalog
    }
}

impl ModalController {
    pub fn new(state: Signal<ModalState>, catalog: Signal<Catalog>) -> Self {
        Self {
            state,
            catalog,
            lock_scroll: set_page_scroll_locked,
        }
    }

    #[cfg(test)]
    pub fn with_scroll_lock(
        state: Signal<ModalState>,
        catalog: Signal<Catalog>,
        lock_scroll: fn(bool),
    ) -> Self {
        Self {
            state,
            catalog,
            lock_scroll,
        }
    }

    /// Binds and shows `release_id`. Unknown ids do not touch the modal signal.
    pub fn open(&mut self, release_id: &str) {
        let catalog = self.catalog.peek();
        if catalog.get(release_id).is_none() {
            debug!("ignoring open for unknown release {}", release_id);
            return;
        }
        self.state.with_mut(|state| state.open(&catalog, release_id));
        (self.lock_scroll)(true);
    }

    /// Hides the modal. Playback carries on in the transport bar.
    /// A no-op while hidden, so stray Escape presses leave the page alone.
    pub fn close(&mut self) {
        if !self.state.peek().is_visible() {
            return;
        }
        self.state.with_mut(|state| state.close());
        (self.lock_scroll)(false);
    }

    pub fn current(&self) -> ModalState {
        (self.state)()
    }
}

#[component]
pub fn ReleaseModal(controller: ModalController) -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let engine = use_context::<PlayerSignal>().0;

    let state = controller.current();
    let release = state
        .bound_release()
        .and_then(|id| catalog.read().get(id).cloned());
    let visible = state.is_visible();
    // Progress ticks rewrite the engine several times a second; only a
    // different highlighted row should reach this component.
    let playing_row = use_memo(move || {
        let state = controller.current();
        engine.read().playing_row(state.visible_release())
    });
    let playing_row = playing_row();

    let on_backdrop = {
        let mut controller = controller;
        move |_| controller.close()
    };

    rsx! {
        div {
            id: "player-modal",
            class: if visible { "modal-overlay visible" } else { "modal-overlay" },
            aria_hidden: if visible { "false" } else { "true" },
            onclick: on_backdrop,
            div {
                class: "modal-content",
                role: "dialog",
                onclick: move |evt: MouseEvent| evt.stop_propagation(),
                button {
                    id: "modal-close-btn",
                    r#type: "button",
                    class: "modal-close",
                    aria_label: "Close",
                    onclick: {
                        let mut controller = controller;
                        move |_| controller.close()
                    },
                    Icon { name: "x".to_string(), class: "icon".to_string() }
                }
                if let Some(release) = release {
                    ReleaseDetail { release, playing_row }
                }
            }
        }
    }
}

#[component]
fn ReleaseDetail(release: Release, playing_row: Option<usize>) -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let state = use_context::<Signal<ModalState>>();
    let mut engine = use_context::<PlayerSignal>().0;

    rsx! {
        div { class: "modal-body",
            img {
                id: "modal-album-img",
                class: "modal-art",
                src: "{release.image_url}",
                alt: "{release.cover_alt()}",
            }
            div { class: "modal-info",
                h2 { id: "modal-title", "{release.title}" }
                p { id: "modal-catalog", class: "modal-catalog", "{release.catalog_info}" }
                ol { id: "modal-tracklist", class: "modal-tracklist",
                    for (index, track) in release.tracklist.iter().enumerate() {
                        li {
                            key: "{index}",
                            "data-track-index": "{index}",
                            class: if playing_row == Some(index) { "playing" } else { "" },
                            onclick: move |_| {
                                let modal = state.peek().clone();
                                let catalog = catalog.peek();
                                let mut session = engine.write();
                                if let Err(err) = play_from_modal(&modal, &*catalog, &mut *session, index) {
                                    warn!("could not start playback: {}", err);
                                }
                            },
                            div {
                                span { class: "modal-track-number", "{track_number_label(index)}" }
                                " {track}"
                            }
                        }
                    }
                }
                div { id: "modal-links", class: "modal-links",
                    for link in release.links.iter() {
                        a {
                            key: "{link.platform}",
                            href: "{link.url}",
                            target: "_blank",
                            rel: "noopener noreferrer",
                            "{link.label()}"
                        }
                    }
                }
            }
        }
    }
}
