//! Platform-agnostic playback resource traits
//!
//! Abstracts the single live audio handle so the engine works the same
//! against a real decoder backend, the simulated clock backend, and test
//! doubles. Exactly one resource may be live process-wide; the engine
//! enforces that by unloading before every load and by discarding stale
//! load results.

use crate::error::Result;
use async_trait::async_trait;
use talat_core::Track;

/// Point-in-time status of a loaded resource, polled rather than pushed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceStatus {
    /// Whether the handle still holds a decodable source
    pub is_loaded: bool,

    /// Playback position in milliseconds
    pub position_ms: u64,

    /// Total duration, `None` while unknown
    pub duration_ms: Option<u64>,

    /// True exactly once, on the poll that observes the track finishing
    pub did_just_finish: bool,
}

/// Options applied when loading a source
#[derive(Debug, Clone, Copy)]
pub struct LoadOptions {
    /// Start playing as soon as the source resolves
    pub autoplay: bool,

    /// Loop at the resource level. The engine never enables this; repeat
    /// is handled as an explicit finish branch so the finish signal is
    /// always observable.
    pub looping: bool,

    /// Initial position in milliseconds
    pub start_position_ms: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            autoplay: true,
            looping: false,
            start_position_ms: 0,
        }
    }
}

/// One live decodable audio handle.
///
/// `play`/`pause` are synchronous fire-and-forget and no-ops when already
/// in the requested state; `seek` and `unload` may suspend the caller.
#[async_trait]
pub trait PlaybackResource: Send {
    /// Resume playback; no-op if already playing or unloaded
    fn play(&mut self);

    /// Suspend playback; no-op if already paused or unloaded
    fn pause(&mut self);

    /// Seek to a position in milliseconds. Implementations clamp to
    /// `[0, duration]`; callers treat failures as log-only.
    async fn seek(&mut self, position_ms: u64) -> Result<()>;

    /// Poll current status; must be cheap and side-effect-free apart from
    /// latching `did_just_finish`
    fn status(&self) -> ResourceStatus;

    /// Release the underlying source; idempotent
    async fn unload(&mut self);
}

/// Resolves a track's opaque `audio_url` into a live resource.
///
/// Fails with [`crate::PlaybackError::Load`] when the source is
/// unreachable or malformed.
#[async_trait]
pub trait ResourceLoader: Send + Sync {
    /// Load a track, producing a ready-to-play resource
    async fn load(&self, track: &Track, options: LoadOptions) -> Result<Box<dyn PlaybackResource>>;
}
