// Desktop-webview audio bridge: a hidden `<audio>` element driven through `document::eval`.
use super::media::{known_duration, MediaElement, MediaEvent};
use dioxus::prelude::*;
use serde::Deserialize;

/// How often the controller asks the webview for a fresh snapshot.
pub const POLL_INTERVAL_MS: u64 = 250;

const BRIDGE_BOOTSTRAP_JS: &str = r#"
(() => {
  if (window.__tapeshelfAudioBridge) {
    return true;
  }

  const elementId = __ELEMENT_ID__;
  const existing = document.getElementById(elementId);
  const audio = existing || document.createElement("audio");
  if (!existing) {
    audio.id = elementId;
    audio.preload = "metadata";
    audio.style.display = "none";
    document.body.appendChild(audio);
  }

  const bridge = {
    audio,
    metadataPending: false,
    endedPending: false,
    apply(cmd) {
      if (!cmd || !cmd.type) return;

      switch (cmd.type) {
        case "load":
          if (cmd.src && audio.src !== cmd.src) {
            audio.src = cmd.src;
          }
          bridge.endedPending = false;
          break;
        case "play":
          audio.play().catch(() => {});
          break;
        case "pause":
          audio.pause();
          break;
        case "seek":
          if (typeof cmd.position === "number" && Number.isFinite(cmd.position)) {
            try {
              audio.currentTime = Math.max(0, cmd.position);
            } catch (_err) {}
          }
          break;
      }
    },
    snapshot() {
      const snap = {
        current_time: Number.isFinite(audio.currentTime) ? audio.currentTime : 0,
        duration: Number.isFinite(audio.duration) ? audio.duration : 0,
        metadata: bridge.metadataPending,
        ended: bridge.endedPending,
      };
      bridge.metadataPending = false;
      bridge.endedPending = false;
      return snap;
    },
  };

  audio.addEventListener("loadedmetadata", () => { bridge.metadataPending = true; });
  audio.addEventListener("ended", () => { bridge.endedPending = true; });

  window.__tapeshelfAudioBridge = bridge;
  return true;
})();
"#;

/// What the webview reported about the audio element since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct BridgeSnapshot {
    pub current_time: f64,
    pub duration: f64,
    /// `loadedmetadata` fired since the previous snapshot.
    #[serde(default)]
    pub metadata: bool,
    /// `ended` fired since the previous snapshot.
    #[serde(default)]
    pub ended: bool,
}

pub fn ensure_bridge(element_id: &str) {
    let id = serde_json::to_string(element_id).unwrap_or_else(|_| "\"\"".to_string());
    let _ = document::eval(&BRIDGE_BOOTSTRAP_JS.replace("__ELEMENT_ID__", &id));
}

fn bridge_command(element_id: &str, value: serde_json::Value) {
    ensure_bridge(element_id);
    let payload = serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string());
    let script = format!(
        r#"(function () {{
            const bridge = window.__tapeshelfAudioBridge;
            if (!bridge) return false;
            bridge.apply({payload});
            return true;
        }})();"#
    );
    let _ = document::eval(&script);
}

pub async fn bridge_snapshot() -> Option<BridgeSnapshot> {
    let eval = document::eval(
        r#"return (function () {
            const bridge = window.__tapeshelfAudioBridge;
            if (!bridge || typeof bridge.snapshot !== "function") return null;
            return bridge.snapshot();
        })();"#,
    );
    eval.join::<Option<BridgeSnapshot>>().await.ok().flatten()
}

pub async fn bridge_delay_ms(ms: u64) {
    let script = format!(
        r#"return (async function () {{
            await new Promise(resolve => setTimeout(resolve, {ms}));
            return true;
        }})();"#
    );
    let _ = document::eval(&script).await;
}

/// Desktop playback through the webview's `<audio>` element.
///
/// Commands go out immediately; time and duration are whatever the last
/// absorbed snapshot said, since the webview can only be read asynchronously.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeMedia {
    element_id: String,
    position: f64,
    duration: Option<f64>,
}

impl BridgeMedia {
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
            position: 0.0,
            duration: None,
        }
    }

    /// Folds a snapshot into the cached state and returns the media events it implies,
    /// in the order the browser would have fired them.
    pub fn absorb(&mut self, snapshot: BridgeSnapshot) -> Vec<MediaEvent> {
        let mut events = Vec::new();
        let duration = known_duration(snapshot.duration);
        let position = snapshot.current_time.max(0.0);

        if snapshot.metadata || (self.duration.is_none() && duration.is_some()) {
            events.push(MediaEvent::MetadataReady);
        }
        if position != self.position || duration != self.duration {
            events.push(MediaEvent::TimeUpdate);
        }
        self.position = position;
        self.duration = duration;

        if snapshot.ended {
            events.push(MediaEvent::Ended);
        }
        events
    }
}

impl MediaElement for BridgeMedia {
    fn set_source(&mut self, url: &str) {
        self.position = 0.0;
        self.duration = None;
        bridge_command(
            &self.element_id,
            serde_json::json!({ "type": "load", "src": url }),
        );
    }

    fn play(&mut self) {
        bridge_command(&self.element_id, serde_json::json!({ "type": "play" }));
    }

    fn pause(&mut self) {
        bridge_command(&self.element_id, serde_json::json!({ "type": "pause" }));
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.position = seconds;
        bridge_command(
            &self.element_id,
            serde_json::json!({ "type": "seek", "position": seconds }),
        );
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}
