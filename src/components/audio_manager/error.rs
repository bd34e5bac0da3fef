//! Error types for playback management

use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// Release has no tracks to build a playlist from
    #[error("release {0} has no tracks")]
    EmptyRelease(String),

    /// Track index outside the playlist
    #[error("track index {index} out of bounds for playlist of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type for playback operations
pub type PlaybackResult<T> = std::result::Result<T, PlaybackError>;
