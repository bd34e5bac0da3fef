use serde::Deserialize;

pub const DEFAULT_CATALOG_URL: &str = "./releases.json";
pub const DEFAULT_AUDIO_ELEMENT_ID: &str = "tapeshelf-audio";
pub const DEFAULT_SCRUB_TRACK_ID: &str = "progress-bar-container";

/// Fixed page wiring. Nothing here is persisted between sessions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub catalog_url: String,
    pub audio_element_id: String,
    pub scrub_track_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            audio_element_id: DEFAULT_AUDIO_ELEMENT_ID.to_string(),
            scrub_track_id: DEFAULT_SCRUB_TRACK_ID.to_string(),
        }
    }
}
