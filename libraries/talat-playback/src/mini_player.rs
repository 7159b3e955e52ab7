//! Mini-player / player-modal binding
//!
//! Thin adapter between a UI surface and the engine: renders the engine
//! snapshot into display-ready values and forwards tap intents. Engine
//! errors never escape a tap handler; they become a consumable notice the
//! UI can show as an alert.

use crate::engine::PlaybackEngine;
use crate::error::PlaybackError;
use crate::types::{PlaybackPhase, PlaybackSnapshot};
use std::sync::{Arc, Mutex};
use talat_core::Track;

/// Clock label shown while duration is unknown
const UNKNOWN_CLOCK: &str = "--:--";

/// Display-ready view of the player, rebuilt on every refresh
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    /// Current track title
    pub title: String,
    /// Current track artist
    pub artist: String,
    /// Cover image reference, if any
    pub image_url: Option<String>,
    /// Position as an `m:ss` clock
    pub position_label: String,
    /// Duration as an `m:ss` clock, `--:--` while loading
    pub duration_label: String,
    /// Position / duration in `0.0..=1.0`, 0 while duration unknown
    pub progress: f32,
    /// Play/pause button state
    pub is_playing: bool,
    /// True while the source is still resolving
    pub is_loading: bool,
    /// Heart button state for the current track
    pub is_favorite: bool,
    /// Shuffle toggle state
    pub is_shuffle: bool,
    /// Repeat toggle state
    pub is_repeat: bool,
}

/// UI-facing handle around a shared engine.
///
/// All methods are safe to call from event handlers; the caller never
/// manages resource lifecycles.
pub struct MiniPlayer {
    engine: Arc<PlaybackEngine>,
    notice: Mutex<Option<String>>,
}

impl MiniPlayer {
    /// Bind a mini player to an engine
    pub fn new(engine: Arc<PlaybackEngine>) -> Self {
        Self {
            engine,
            notice: Mutex::new(None),
        }
    }

    /// Poll the engine and render the view; `None` while idle (the mini
    /// player is hidden when nothing is playing)
    pub async fn refresh(&self) -> Option<PlayerView> {
        let snapshot = self.engine.poll_status().await;
        self.render(&snapshot)
    }

    /// Render from the cached snapshot without touching the resource
    pub fn view(&self) -> Option<PlayerView> {
        self.render(&self.engine.snapshot())
    }

    /// Take the pending user-facing notice, if any (consumed on read)
    pub fn notice(&self) -> Option<String> {
        self.notice.lock().unwrap().take()
    }

    // ===== Intents =====

    /// Start a track within its browsing context (album, poet, playlist)
    pub async fn play(&self, track: Track, context: Vec<Track>) {
        let queue = if context.is_empty() {
            None
        } else {
            Some(context)
        };
        if let Err(err) = self.engine.play_track(track, queue).await {
            self.push_notice(&err);
        }
    }

    /// Play/pause button
    pub async fn tap_play_pause(&self) {
        self.engine.toggle_play_pause().await;
    }

    /// Next button
    pub async fn tap_next(&self) {
        if let Err(err) = self.engine.play_next().await {
            self.push_notice(&err);
        }
    }

    /// Previous button
    pub async fn tap_previous(&self) {
        if let Err(err) = self.engine.play_previous().await {
            self.push_notice(&err);
        }
    }

    /// Shuffle toggle
    pub fn tap_shuffle(&self) -> bool {
        self.engine.toggle_shuffle()
    }

    /// Repeat toggle
    pub fn tap_repeat(&self) -> bool {
        self.engine.toggle_repeat()
    }

    /// Heart button on the current track; no-op when idle
    pub fn tap_favorite(&self) {
        if let Some(track) = self.engine.snapshot().current_track {
            self.engine.toggle_favorite(&track);
        }
    }

    /// Close button: stop playback and hide the mini player
    pub async fn tap_close(&self) {
        self.engine.clear_current_track().await;
    }

    /// Progress-bar drag, as a fraction of the track
    pub async fn seek_to_fraction(&self, fraction: f32) {
        let Some(duration) = self.engine.snapshot().duration_ms else {
            return;
        };
        let fraction = fraction.clamp(0.0, 1.0);
        let target = (duration as f64 * f64::from(fraction)) as u64;
        self.engine.seek_to(target).await;
    }

    /// 15-second forward button
    pub async fn tap_skip_forward(&self) {
        self.engine.skip_forward().await;
    }

    /// 15-second backward button
    pub async fn tap_skip_backward(&self) {
        self.engine.skip_backward().await;
    }

    // ===== Rendering =====

    fn render(&self, snapshot: &PlaybackSnapshot) -> Option<PlayerView> {
        let track = snapshot.current_track.as_ref()?;
        let is_loading = snapshot.phase == PlaybackPhase::Loading;

        let (duration_label, progress) = match snapshot.duration_ms {
            Some(duration) if !is_loading => {
                let progress = if duration == 0 {
                    0.0
                } else {
                    (snapshot.position_ms as f64 / duration as f64).clamp(0.0, 1.0) as f32
                };
                (format_clock(duration), progress)
            }
            _ => (UNKNOWN_CLOCK.to_string(), 0.0),
        };

        Some(PlayerView {
            title: track.title.clone(),
            artist: track.artist.clone(),
            image_url: track.image_url.clone(),
            position_label: format_clock(if is_loading { 0 } else { snapshot.position_ms }),
            duration_label,
            progress,
            is_playing: snapshot.is_playing(),
            is_loading,
            is_favorite: self.engine.is_favorite(&track.id),
            is_shuffle: snapshot.is_shuffle,
            is_repeat: snapshot.is_repeat,
        })
    }

    fn push_notice(&self, err: &PlaybackError) {
        let message = match err {
            PlaybackError::TrackUnavailable { .. } => {
                "Sorry, this track is not available right now.".to_string()
            }
            _ => "Something went wrong while playing the track. Please try again.".to_string(),
        };
        *self.notice.lock().unwrap() = Some(message);
    }
}

/// Format milliseconds as an `m:ss` clock (hours roll into minutes)
fn format_clock(ms: u64) -> String {
    let total_seconds = ms / 1000;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
