//! Playlist, cursor and play/pause state for the single playback session.
//!
//! The engine is a ring player: `next`/`prev` wrap, and a track ending is the
//! same as pressing next, so there is no terminal "stopped" state once a
//! playlist exists. It never reads the DOM; everything it knows about the
//! outside world comes through the [`MediaElement`] it owns.

use super::error::{PlaybackError, PlaybackResult};
use super::media::{MediaElement, MediaEvent};
use crate::api::{format_time, Catalog, PlaylistEntry, Release};
use dioxus::logger::tracing::{debug, info};

/// Elapsed/total time as last reported by the media element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Progress {
    pub elapsed: f64,
    pub duration: Option<f64>,
}

impl Progress {
    /// Filled share of the scrub bar, 0 while the duration is unknown.
    pub fn fraction(&self) -> f64 {
        match self.duration {
            Some(total) if total > 0.0 => (self.elapsed / total).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    pub fn elapsed_label(&self) -> String {
        format_time(self.elapsed)
    }

    pub fn total_label(&self) -> String {
        format_time(self.duration.unwrap_or(0.0))
    }
}

/// What the transport bar shows for the current entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NowPlaying {
    pub art_url: String,
    pub art_alt: String,
    pub title: String,
    pub artist: String,
    pub is_playing: bool,
}

impl NowPlaying {
    pub fn toggle_label(&self) -> &'static str {
        if self.is_playing {
            "Pause"
        } else {
            "Play"
        }
    }
}

pub struct PlaybackEngine<M: MediaElement> {
    media: M,
    playlist: Vec<PlaylistEntry>,
    cursor: Option<usize>,
    is_playing: bool,
    bar_visible: bool,
    progress: Progress,
}

impl<M: MediaElement> PlaybackEngine<M> {
    pub fn new(media: M) -> Self {
        Self {
            media,
            playlist: Vec::new(),
            cursor: None,
            is_playing: false,
            bar_visible: false,
            progress: Progress::default(),
        }
    }

    /// Replaces the playlist with every track of `release` and starts playing
    /// at `start_index`. State is untouched when the request is invalid.
    pub fn build_playlist(&mut self, release: &Release, start_index: usize) -> PlaybackResult<()> {
        if release.tracklist.is_empty() {
            return Err(PlaybackError::EmptyRelease(release.id.clone()));
        }
        let len = release.tracklist.len().min(release.audio_src.len());
        if start_index >= len {
            return Err(PlaybackError::IndexOutOfBounds {
                index: start_index,
                len,
            });
        }

        self.playlist = release
            .tracklist
            .iter()
            .zip(release.audio_src.iter())
            .enumerate()
            .map(|(track_index, (title, audio_src))| PlaylistEntry {
                title: title.clone(),
                audio_src: audio_src.clone(),
                release_id: release.id.clone(),
                track_index,
            })
            .collect();
        self.bar_visible = true;
        info!(
            "playlist built from {} ({} tracks), starting at {}",
            release.id,
            self.playlist.len(),
            start_index
        );
        self.load_track(start_index)
    }

    /// Points the cursor at `index`, swaps the media source and requests playback.
    pub fn load_track(&mut self, index: usize) -> PlaybackResult<()> {
        let entry = self
            .playlist
            .get(index)
            .ok_or(PlaybackError::IndexOutOfBounds {
                index,
                len: self.playlist.len(),
            })?;
        debug!("loading track {}: {}", index, entry.audio_src);
        self.media.set_source(&entry.audio_src);
        self.cursor = Some(index);
        self.progress = Progress::default();
        self.play();
        Ok(())
    }

    pub fn play(&mut self) {
        if self.cursor.is_none() {
            if !self.playlist.is_empty() {
                let _ = self.load_track(0);
            }
            return;
        }
        self.is_playing = true;
        self.media.play();
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
        self.media.pause();
    }

    pub fn toggle(&mut self) {
        if self.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    pub fn next(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let target = match self.cursor {
            Some(current) => (current + 1) % len,
            None => 0,
        };
        let _ = self.load_track(target);
    }

    pub fn prev(&mut self) {
        let len = self.playlist.len();
        if len == 0 {
            return;
        }
        let target = match self.cursor {
            Some(current) => (current + len - 1) % len,
            None => len - 1,
        };
        let _ = self.load_track(target);
    }

    pub fn handle_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::TimeUpdate | MediaEvent::MetadataReady => self.refresh_progress(),
            MediaEvent::Ended => self.next(),
        }
    }

    fn refresh_progress(&mut self) {
        self.progress = Progress {
            elapsed: self.media.current_time(),
            duration: self.media.duration(),
        };
    }

    /// Jumps to `fraction` of the current track. Ignored until the duration is known.
    pub fn seek_to_fraction(&mut self, fraction: f64) {
        if !fraction.is_finite() {
            return;
        }
        let Some(duration) = self.media.duration() else {
            return;
        };
        let position = fraction.clamp(0.0, 1.0) * duration;
        self.media.set_current_time(position);
        self.progress = Progress {
            elapsed: position,
            duration: Some(duration),
        };
    }

    pub fn current_entry(&self) -> Option<&PlaylistEntry> {
        self.cursor.and_then(|idx| self.playlist.get(idx))
    }

    pub fn source_release_id(&self) -> Option<&str> {
        self.playlist.first().map(|entry| entry.release_id.as_str())
    }

    /// Row of the open modal that should carry the "playing" marker. Only the
    /// release the playlist was built from can be highlighted.
    pub fn playing_row(&self, visible_modal_release: Option<&str>) -> Option<usize> {
        let modal_release = visible_modal_release?;
        if self.source_release_id()? != modal_release {
            return None;
        }
        self.current_entry().map(|entry| entry.track_index)
    }

    /// Nothing to show until a track has been loaded.
    pub fn now_playing(&self, catalog: &Catalog) -> Option<NowPlaying> {
        let entry = self.current_entry()?;
        let release = catalog.get(&entry.release_id)?;
        Some(NowPlaying {
            art_url: release.image_url.clone(),
            art_alt: release.cover_alt(),
            title: entry.title.clone(),
            artist: release.artist.clone(),
            is_playing: self.is_playing,
        })
    }

    #[cfg(test)]
    pub fn playlist(&self) -> &[PlaylistEntry] {
        &self.playlist
    }

    #[cfg(test)]
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    #[cfg(test)]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn bar_visible(&self) -> bool {
        self.bar_visible
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// The desktop bridge caches what the webview reports, so its controller
    /// folds snapshots into the media element directly.
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub fn media(&self) -> &M {
        &self.media
    }

    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_engine_is_empty() {
        let engine = engine();
        assert_eq!(engine.cursor(), None);
        assert!(!engine.is_playing());
        assert!(!engine.bar_visible());
        assert!(engine.playlist().is_empty());
    }

    #[test]
    fn build_playlist_projects_every_track_and_starts_at_index() {
        let tape = release("a", 4);
        let mut engine = engine();
        engine.build_playlist(&tape, 2).unwrap();

        assert_eq!(engine.playlist().len(), 4);
        assert_eq!(engine.cursor(), Some(2));
        assert!(engine.is_playing());
        assert!(engine.bar_visible());
        let entry = engine.current_entry().unwrap();
        assert_eq!(entry.title, tape.tracklist[2]);
        assert_eq!(entry.audio_src, tape.audio_src[2]);
        assert_eq!(entry.release_id, "a");
        assert_eq!(entry.track_index, 2);
        assert_eq!(
            engine.media().calls,
            vec![
                MediaCall::SetSource("audio/a/2.mp3".to_string()),
                MediaCall::Play
            ]
        );
    }

    #[test]
    fn rebuilding_replaces_the_previous_playlist() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 5), 4).unwrap();
        engine.build_playlist(&release("b", 2), 0).unwrap();

        assert_eq!(engine.playlist().len(), 2);
        assert!(engine.playlist().iter().all(|e| e.release_id == "b"));
        assert_eq!(engine.source_release_id(), Some("b"));
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn invalid_build_requests_leave_state_untouched() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 2), 1).unwrap();

        assert_eq!(
            engine.build_playlist(&release("b", 3), 3),
            Err(PlaybackError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert_eq!(
            engine.build_playlist(&release("empty", 0), 0),
            Err(PlaybackError::EmptyRelease("empty".to_string()))
        );
        assert_eq!(engine.source_release_id(), Some("a"));
        assert_eq!(engine.cursor(), Some(1));
    }

    #[test]
    fn next_wraps_from_last_to_first() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 3), 2).unwrap();
        engine.next();
        assert_eq!(engine.cursor(), Some(0));
    }

    #[test]
    fn prev_wraps_from_first_to_last() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 3), 0).unwrap();
        engine.prev();
        assert_eq!(engine.cursor(), Some(2));
    }

    #[test]
    fn navigation_on_empty_playlist_is_a_no_op() {
        let mut engine = engine();
        engine.next();
        engine.prev();
        assert_eq!(engine.cursor(), None);
        assert!(!engine.is_playing());
        assert!(engine.media().calls.is_empty());
    }

    #[test]
    fn play_with_nothing_loaded_does_nothing() {
        let mut engine = engine();
        engine.play();
        assert!(!engine.is_playing());
        assert!(engine.media().calls.is_empty());
    }

    #[test]
    fn pause_then_play_resumes_without_reloading() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 2), 0).unwrap();
        engine.media_mut().calls.clear();

        engine.toggle();
        assert!(!engine.is_playing());
        engine.toggle();
        assert!(engine.is_playing());
        assert_eq!(engine.cursor(), Some(0));
        assert_eq!(engine.media().calls, vec![MediaCall::Pause, MediaCall::Play]);
    }

    #[test]
    fn ended_advances_around_the_ring() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 2), 0).unwrap();

        engine.handle_media_event(MediaEvent::Ended);
        assert_eq!(engine.cursor(), Some(1));
        engine.handle_media_event(MediaEvent::Ended);
        assert_eq!(engine.cursor(), Some(0));
        assert!(engine.is_playing());
    }

    #[test]
    fn progress_tracks_media_reports() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 1), 0).unwrap();

        engine.handle_media_event(MediaEvent::TimeUpdate);
        assert_eq!(engine.progress().fraction(), 0.0);
        assert_eq!(engine.progress().total_label(), "0:00");

        engine.media_mut().duration = Some(200.0);
        engine.media_mut().position = 50.9;
        engine.handle_media_event(MediaEvent::MetadataReady);
        let progress = engine.progress();
        assert_eq!(progress.fraction(), 50.9 / 200.0);
        assert_eq!(progress.elapsed_label(), "0:50");
        assert_eq!(progress.total_label(), "3:20");
    }

    #[test]
    fn loading_a_track_resets_progress() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 2), 0).unwrap();
        engine.media_mut().duration = Some(100.0);
        engine.media_mut().position = 30.0;
        engine.handle_media_event(MediaEvent::TimeUpdate);

        engine.next();
        assert_eq!(engine.progress(), Progress::default());
    }

    #[test]
    fn seek_requires_a_known_duration() {
        let mut engine = engine();
        engine.build_playlist(&release("a", 1), 0).unwrap();
        engine.media_mut().calls.clear();

        engine.seek_to_fraction(0.5);
        assert!(engine.media().calls.is_empty());

        engine.media_mut().duration = Some(120.0);
        engine.seek_to_fraction(0.25);
        engine.seek_to_fraction(1.7);
        assert_eq!(
            engine.media().calls,
            vec![MediaCall::Seek(30.0), MediaCall::Seek(120.0)]
        );
        assert_eq!(engine.progress().fraction(), 1.0);
    }

    #[test]
    fn highlight_only_applies_to_the_playlist_source() {
        let mut engine = engine();
        assert_eq!(engine.playing_row(Some("a")), None);

        engine.build_playlist(&release("a", 3), 1).unwrap();
        assert_eq!(engine.playing_row(Some("a")), Some(1));
        assert_eq!(engine.playing_row(Some("b")), None);
        assert_eq!(engine.playing_row(None), None);

        engine.next();
        assert_eq!(engine.playing_row(Some("a")), Some(2));
    }

    #[test]
    fn now_playing_reads_art_and_artist_from_the_release() {
        let catalog = Catalog::from_releases(vec![release("a", 2)]);
        let mut engine = engine();
        assert_eq!(engine.now_playing(&catalog), None);

        engine.build_playlist(&release("a", 2), 1).unwrap();
        let shown = engine.now_playing(&catalog).unwrap();
        assert_eq!(shown.title, "a track 1");
        assert_eq!(shown.artist, "Artist a");
        assert_eq!(shown.art_url, "img/a.jpg");
        assert_eq!(shown.toggle_label(), "Pause");

        engine.pause();
        assert_eq!(engine.now_playing(&catalog).unwrap().toggle_label(), "Play");
    }

    proptest! {
        #[test]
        fn next_and_prev_are_inverse(len in 1usize..40, start in 0usize..40) {
            let start = start % len;
            let mut engine = engine();
            engine.build_playlist(&release("ring", len), start).unwrap();

            engine.next();
            engine.prev();
            prop_assert_eq!(engine.cursor(), Some(start));

            engine.prev();
            engine.next();
            prop_assert_eq!(engine.cursor(), Some(start));
        }

        #[test]
        fn double_toggle_restores_play_state(len in 1usize..10, pause_first in any::<bool>()) {
            let mut engine = engine();
            engine.build_playlist(&release("t", len), 0).unwrap();
            if pause_first {
                engine.pause();
            }
            let before = engine.is_playing();
            engine.toggle();
            prop_assert_ne!(engine.is_playing(), before);
            engine.toggle();
            prop_assert_eq!(engine.is_playing(), before);
            prop_assert_eq!(engine.cursor(), Some(0));
        }

        #[test]
        fn highlight_tracks_cursor_of_source_release(
            len in 1usize..20,
            steps in prop::collection::vec(0u8..4, 0..30),
        ) {
            let mut engine = engine();
            let home = release("h", len);
            let other = release("o", 3);
            engine.build_playlist(&home, 0).unwrap();
            let mut source = "h";
            for step in steps {
                match step {
                    0 => engine.next(),
                    1 => engine.prev(),
                    2 => engine.handle_media_event(MediaEvent::Ended),
                    _ => {
                        let (next_source, target) = if source == "h" { ("o", &other) } else { ("h", &home) };
                        engine.build_playlist(target, 0).unwrap();
                        source = next_source;
                    }
                }
                let expected_home = if source == "h" { engine.cursor() } else { None };
                prop_assert_eq!(engine.playing_row(Some("h")), expected_home);
                let expected_other = if source == "o" { engine.cursor() } else { None };
                prop_assert_eq!(engine.playing_row(Some("o")), expected_other);
                prop_assert_eq!(engine.playing_row(None), None);
                prop_assert!(engine.cursor().is_some());
            }
        }
    }
}
