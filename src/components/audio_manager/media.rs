//! The audio output boundary. The engine only ever talks to a [`MediaElement`];
//! what actually renders sound is the platform's business.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlAudioElement};

/// Lifecycle notifications coming back from the media element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    TimeUpdate,
    MetadataReady,
    Ended,
}

pub trait MediaElement {
    fn set_source(&mut self, url: &str);
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);
    /// `None` until the element knows how long the track is.
    fn duration(&self) -> Option<f64>;
}

/// Filters the values browsers report before metadata arrives (NaN, Infinity, 0).
pub fn known_duration(raw: f64) -> Option<f64> {
    (raw.is_finite() && raw > 0.0).then_some(raw)
}

/// Initialize the global audio element once.
#[cfg(target_arch = "wasm32")]
pub fn get_or_create_audio_element(id: &str) -> Option<HtmlAudioElement> {
    let document = window()?.document()?;

    if let Some(existing) = document.get_element_by_id(id) {
        return existing.dyn_into::<HtmlAudioElement>().ok();
    }

    let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
    audio.set_id(id);
    // Keep preload light so we stream instead of buffering entire files
    audio.set_attribute("preload", "metadata").ok()?;
    document.body()?.append_child(&audio).ok()?;

    Some(audio)
}

/// Browser playback through a hidden `<audio>` element.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct WebAudio {
    element_id: String,
}

#[cfg(target_arch = "wasm32")]
impl WebAudio {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }

    fn element(&self) -> Option<HtmlAudioElement> {
        get_or_create_audio_element(&self.element_id)
    }
}

#[cfg(target_arch = "wasm32")]
impl MediaElement for WebAudio {
    fn set_source(&mut self, url: &str) {
        if let Some(audio) = self.element() {
            audio.set_src(url);
        }
    }

    fn play(&mut self) {
        let Some(audio) = self.element() else {
            return;
        };
        // The promise rejects on autoplay policy or bad sources; the event
        // stream is the source of truth, so the rejection is only logged.
        if let Ok(promise) = audio.play() {
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(err) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    dioxus::logger::tracing::debug!("play request rejected: {:?}", err);
                }
            });
        }
    }

    fn pause(&mut self) {
        if let Some(audio) = self.element() {
            let _ = audio.pause();
        }
    }

    fn current_time(&self) -> f64 {
        self.element().map(|a| a.current_time()).unwrap_or(0.0)
    }

    fn set_current_time(&mut self, seconds: f64) {
        if let Some(audio) = self.element() {
            audio.set_current_time(seconds);
        }
    }

    fn duration(&self) -> Option<f64> {
        self.element().and_then(|a| known_duration(a.duration()))
    }
}

#[cfg(target_arch = "wasm32")]
pub type PlatformMedia = WebAudio;

#[cfg(not(target_arch = "wasm32"))]
pub type PlatformMedia = super::bridge::BridgeMedia;
