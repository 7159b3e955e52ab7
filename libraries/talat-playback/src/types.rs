//! Core types for the playback engine

use serde::{Deserialize, Serialize};
use talat_core::Track;

/// Engine lifecycle phase
///
/// `Idle` is both the initial state and the terminal state reached by
/// `clear_current_track`. `Loading` is transient while a source resolves;
/// position and duration are not meaningful there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackPhase {
    /// No track loaded
    Idle,

    /// A source is resolving; position/duration not yet meaningful
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Point-in-time view of the engine, cheap to clone and safe to read at
/// any frequency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    /// Track the engine is playing, paused on, or loading
    pub current_track: Option<Track>,

    /// Current lifecycle phase
    pub phase: PlaybackPhase,

    /// Last observed position in milliseconds
    pub position_ms: u64,

    /// Last observed duration; `None` until the source reports one
    pub duration_ms: Option<u64>,

    /// Whether next/previous pick a random index
    pub is_shuffle: bool,

    /// Whether a finished track replays itself instead of advancing
    pub is_repeat: bool,
}

impl PlaybackSnapshot {
    /// Whether audio is actively progressing
    pub fn is_playing(&self) -> bool {
        self.phase == PlaybackPhase::Playing
    }
}

/// Configuration for the playback engine
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial shuffle flag (default: off)
    pub shuffle: bool,

    /// Initial repeat flag (default: off)
    pub repeat: bool,
}
