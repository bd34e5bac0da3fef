use serde::{Deserialize, Deserializer};

/// One tape in the catalog, as served by `releases.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct Release {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default, alias = "catalogInfo")]
    pub catalog_info: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
    #[serde(default)]
    pub tracklist: Vec<String>,
    #[serde(default, alias = "audioSrc")]
    pub audio_src: Vec<String>,
    #[serde(default, deserialize_with = "links_in_order")]
    pub links: Vec<ReleaseLink>,
}

impl Release {
    /// Track titles and sources are parallel arrays; a release is playable
    /// only when they line up.
    pub fn is_consistent(&self) -> bool {
        self.tracklist.len() == self.audio_src.len()
    }

    pub fn cover_alt(&self) -> String {
        format!("Album cover for {}", self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReleaseLink {
    pub platform: String,
    pub url: String,
}

impl ReleaseLink {
    pub fn label(&self) -> String {
        self.platform.to_uppercase()
    }
}

// `links` is a JSON object; keep the order the file lists the platforms in.
fn links_in_order<'de, D>(deserializer: D) -> Result<Vec<ReleaseLink>, D::Error>
where
    D: Deserializer<'de>,
{
    let map = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
    Ok(map
        .into_iter()
        .filter_map(|(platform, url)| {
            url.as_str().map(|url| ReleaseLink {
                platform,
                url: url.to_string(),
            })
        })
        .collect())
}

/// A single track of the active playlist, denormalized from its release.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistEntry {
    pub title: String,
    pub audio_src: String,
    pub release_id: String,
    pub track_index: usize,
}

/// Formats seconds as `m:ss`. Fractions are truncated, not rounded.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "0:00".to_string();
    }
    let whole = seconds.trunc() as u64;
    let mins = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", mins, secs)
}

/// Zero-padded, one-based label shown in front of each track row.
pub fn track_number_label(index: usize) -> String {
    format!("{:02}.", index + 1)
}
