use crate::api::Catalog;
use crate::components::audio_manager::{NowPlaying, PlayerSignal};
use crate::components::web::scrub_track_width;
use crate::components::Icon;
use crate::config::AppConfig;
use dioxus::prelude::*;

/// Persistent "now playing" bar at the bottom of the page.
#[component]
pub fn Player() -> Element {
    let catalog = use_context::<Signal<Catalog>>();
    let config = use_context::<AppConfig>();
    let mut engine = use_context::<PlayerSignal>().0;

    let (visible, current, progress) = {
        let session = engine.read();
        let current = session.now_playing(&catalog.read());
        (session.bar_visible(), current, session.progress())
    };

    let on_seek = {
        let track_id = config.scrub_track_id.clone();
        move |evt: MouseEvent| {
            let offset = evt.element_coordinates().x;
            let track_id = track_id.clone();
            spawn(async move {
                let Some(width) = scrub_track_width(&track_id).await else {
                    return;
                };
                engine.write().seek_to_fraction(offset / width);
            });
        }
    };

    rsx! {
        div {
            id: "now-playing-bar",
            class: if visible { "now-playing-bar visible" } else { "now-playing-bar" },
            div { class: "player-track",
                NowPlayingInfo { current: current.clone() }
            }
            div { class: "player-controls",
                div { class: "player-buttons",
                    PrevButton {}
                    PlayPauseButton { current: current.clone() }
                    NextButton {}
                }
                div { class: "player-progress",
                    span { id: "current-time", class: "player-time", "{progress.elapsed_label()}" }
                    div {
                        id: "{config.scrub_track_id}",
                        class: "progress-track",
                        onclick: on_seek,
                        div {
                            id: "progress-bar",
                            class: "progress-fill",
                            style: "transform: scaleX({progress.fraction()})",
                        }
                    }
                    span { id: "total-duration", class: "player-time", "{progress.total_label()}" }
                }
            }
        }
    }
}

#[component]
fn NowPlayingInfo(current: Option<NowPlaying>) -> Element {
    // Nothing is shown until a track has been loaded
    let Some(track) = current else {
        return rsx! {
            div { class: "player-art placeholder",
                Icon { name: "cassette".to_string(), class: "icon".to_string() }
            }
        };
    };

    rsx! {
        img {
            id: "player-art-img",
            class: "player-art",
            src: "{track.art_url}",
            alt: "{track.art_alt}",
        }
        div { class: "player-meta",
            p { id: "player-track-title", class: "player-title", "{track.title}" }
            p { id: "player-track-artist", class: "player-artist", "{track.artist}" }
        }
    }
}

#[component]
fn PlayPauseButton(current: Option<NowPlaying>) -> Element {
    let mut engine = use_context::<PlayerSignal>().0;
    let playing = current.as_ref().map(|c| c.is_playing).unwrap_or(false);
    let label = current
        .as_ref()
        .map(NowPlaying::toggle_label)
        .unwrap_or("Play");

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: if playing { "player-toggle playing" } else { "player-toggle" },
            aria_label: "{label}",
            onclick: move |_| engine.write().toggle(),
            if playing {
                Icon { name: "pause".to_string(), class: "icon".to_string() }
            } else {
                Icon { name: "play".to_string(), class: "icon".to_string() }
            }
        }
    }
}

/// Previous button - wraps to the last track from the first
#[component]
fn PrevButton() -> Element {
    let mut engine = use_context::<PlayerSignal>().0;

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: "player-skip",
            aria_label: "Previous track",
            onclick: move |_| engine.write().prev(),
            Icon { name: "prev".to_string(), class: "icon".to_string() }
        }
    }
}

/// Next button - wraps to the first track from the last
#[component]
fn NextButton() -> Element {
    let mut engine = use_context::<PlayerSignal>().0;

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: "player-skip",
            aria_label: "Next track",
            onclick: move |_| engine.write().next(),
            Icon { name: "next".to_string(), class: "icon".to_string() }
        }
    }
}
