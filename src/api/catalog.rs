use crate::api::models::Release;
use dioxus::logger::tracing::{info, warn};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    /// Fetch and status failures only exist on the web; desktop builds read from disk.
    #[cfg(target_arch = "wasm32")]
    #[error("request failed: {0}")]
    Transport(String),

    #[cfg(target_arch = "wasm32")]
    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("malformed catalog: {0}")]
    Parse(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("could not read catalog file: {0}")]
    Io(String),
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

/// Releases keyed by id, iterated in the order they were fetched.
///
/// Filled once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    releases: Vec<Release>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the store, dropping records that would break lookups or playback:
    /// duplicate ids keep the first occurrence, and releases whose track titles
    /// and sources differ in length are skipped.
    pub fn from_releases(records: Vec<Release>) -> Self {
        let mut catalog = Self::default();
        for release in records {
            if !release.is_consistent() {
                warn!(
                    "skipping release {}: {} titles but {} audio sources",
                    release.id,
                    release.tracklist.len(),
                    release.audio_src.len()
                );
                continue;
            }
            if catalog.by_id.contains_key(&release.id) {
                warn!("skipping duplicate release id {}", release.id);
                continue;
            }
            catalog
                .by_id
                .insert(release.id.clone(), catalog.releases.len());
            catalog.releases.push(release);
        }
        catalog
    }

    pub fn get(&self, id: &str) -> Option<&Release> {
        self.by_id.get(id).and_then(|idx| self.releases.get(*idx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter()
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }
}

/// Where the gallery stands with respect to the one-shot startup fetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Empty,
    Failed,
}

impl CatalogStatus {
    pub fn from_load(result: &CatalogResult<Catalog>) -> Self {
        match result {
            Ok(catalog) if catalog.is_empty() => CatalogStatus::Empty,
            Ok(_) => CatalogStatus::Ready,
            Err(_) => CatalogStatus::Failed,
        }
    }
}

pub fn parse_catalog(body: &str) -> CatalogResult<Catalog> {
    let records: Vec<Release> =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(Catalog::from_releases(records))
}

/// Fetches the release list once. There is no retry and no timeout.
#[cfg(target_arch = "wasm32")]
pub async fn load_catalog(url: &str) -> CatalogResult<Catalog> {
    let response = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()))?;
    if !response.ok() {
        return Err(CatalogError::Status(response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|e| CatalogError::Transport(e.to_string()))?;
    let catalog = parse_catalog(&body)?;
    info!("loaded {} releases from {}", catalog.len(), url);
    Ok(catalog)
}

/// Desktop builds read the same document from the `public` directory the web build serves.
#[cfg(not(target_arch = "wasm32"))]
pub async fn load_catalog(url: &str) -> CatalogResult<Catalog> {
    let relative = url.trim_start_matches("./");
    let path = std::path::Path::new("public").join(relative);
    let body = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CatalogError::Io(format!("{}: {}", path.display(), e)))?;
    let catalog = parse_catalog(&body)?;
    info!("loaded {} releases from {}", catalog.len(), path.display());
    Ok(catalog)
}
