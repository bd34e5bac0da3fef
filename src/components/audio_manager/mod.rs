//! Audio Manager - owns the playback session and binds it to the media element.
//! Playback lives outside the modal and gallery so closing or re-rendering them
//! never interrupts the current track.

#[cfg(not(target_arch = "wasm32"))]
mod bridge;
mod engine;
mod error;
mod media;

pub use engine::{NowPlaying, PlaybackEngine};
pub use error::PlaybackResult;
pub use media::{MediaElement, MediaEvent, PlatformMedia};
#[cfg(not(target_arch = "wasm32"))]
use bridge::{bridge_delay_ms, bridge_snapshot, ensure_bridge, POLL_INTERVAL_MS};
#[cfg(target_arch = "wasm32")]
use media::get_or_create_audio_element;

#[cfg(test)]
pub(crate) use engine::test_support;

use crate::config::AppConfig;
use dioxus::prelude::*;

#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// The one playback session of the page.
pub type PlayerEngine = PlaybackEngine<PlatformMedia>;

/// Shared handle to the session, provided through context by the shell.
#[derive(Clone, Copy)]
pub struct PlayerSignal(pub Signal<PlayerEngine>);

pub fn new_player_engine(config: &AppConfig) -> PlayerEngine {
    PlaybackEngine::new(PlatformMedia::new(config.audio_element_id.clone()))
}

/// Audio controller hook - bootstraps the webview bridge and polls it for media events.
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn AudioController() -> Element {
    let config = use_context::<AppConfig>();
    let mut engine = use_context::<PlayerSignal>().0;

    use_effect(move || {
        ensure_bridge(&config.audio_element_id);

        spawn(async move {
            loop {
                bridge_delay_ms(POLL_INTERVAL_MS).await;

                let Some(snapshot) = bridge_snapshot().await else {
                    continue;
                };

                // Fold into a copy first so an idle poll never touches the signal
                let mut media = engine.peek().media().clone();
                let events = media.absorb(snapshot);
                if events.is_empty() {
                    continue;
                }

                let mut session = engine.write();
                *session.media_mut() = media;
                for event in events {
                    session.handle_media_event(event);
                }
            }
        });
    });

    rsx! {}
}

/// Audio controller hook - forwards `<audio>` lifecycle events into the engine.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn AudioController() -> Element {
    let config = use_context::<AppConfig>();
    let engine = use_context::<PlayerSignal>().0;

    use_effect(move || {
        let Some(audio) = get_or_create_audio_element(&config.audio_element_id) else {
            return;
        };
        let runtime = Runtime::current();

        let forward = |event: MediaEvent| {
            let runtime = runtime.clone();
            let mut engine = engine;
            Closure::wrap(Box::new(move || {
                let _guard = RuntimeGuard::new(runtime.clone());
                engine.write().handle_media_event(event);
            }) as Box<dyn FnMut()>)
        };

        let time_closure = forward(MediaEvent::TimeUpdate);
        audio.set_ontimeupdate(Some(time_closure.as_ref().unchecked_ref()));
        time_closure.forget();

        let meta_closure = forward(MediaEvent::MetadataReady);
        audio.set_onloadedmetadata(Some(meta_closure.as_ref().unchecked_ref()));
        meta_closure.forget();

        // Auto-advance: the playlist is a ring, so ending always moves on
        let end_closure = forward(MediaEvent::Ended);
        audio.set_onended(Some(end_closure.as_ref().unchecked_ref()));
        end_closure.forget();
    });

    // Return empty element - this component just manages state
    rsx! {}
}
