//! Wall-clock simulated playback backend
//!
//! Stands in for a real decoder: position advances with elapsed time
//! while playing and the track "finishes" when it reaches its duration.
//! Used by the CLI shell and anywhere a decodable source is out of scope.

use crate::error::{PlaybackError, Result};
use crate::resource::{LoadOptions, PlaybackResource, ResourceLoader, ResourceStatus};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use talat_core::Track;
use tracing::debug;

/// Simulated audio handle driven by the wall clock
pub struct ClockResource {
    duration: Duration,
    looping: bool,
    /// Position accumulated up to the last play/pause/seek transition
    base: Duration,
    /// Set while playing
    started_at: Option<Instant>,
    loaded: bool,
    finish_latched: AtomicBool,
}

impl ClockResource {
    /// Create a loaded handle of the given duration
    pub fn new(duration: Duration, options: LoadOptions) -> Self {
        let mut resource = Self {
            duration,
            looping: options.looping,
            base: Duration::from_millis(options.start_position_ms).min(duration),
            started_at: None,
            loaded: true,
            finish_latched: AtomicBool::new(false),
        };
        if options.autoplay {
            resource.play();
        }
        resource
    }

    fn position(&self) -> Duration {
        let mut position = self.base;
        if let Some(started_at) = self.started_at {
            position += started_at.elapsed();
        }
        if self.looping && !self.duration.is_zero() {
            let nanos = position.as_nanos() % self.duration.as_nanos();
            return Duration::from_nanos(nanos as u64);
        }
        position.min(self.duration)
    }
}

#[async_trait]
impl PlaybackResource for ClockResource {
    fn play(&mut self) {
        if self.loaded && self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if self.started_at.is_some() {
            self.base = self.position();
            self.started_at = None;
        }
    }

    async fn seek(&mut self, position_ms: u64) -> Result<()> {
        if !self.loaded {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let target = Duration::from_millis(position_ms).min(self.duration);
        let was_playing = self.started_at.is_some();
        self.base = target;
        if was_playing {
            self.started_at = Some(Instant::now());
        }
        if target < self.duration {
            self.finish_latched.store(false, Ordering::SeqCst);
        }
        Ok(())
    }

    fn status(&self) -> ResourceStatus {
        if !self.loaded {
            return ResourceStatus::default();
        }

        let position = self.position();
        let finished = !self.looping && position >= self.duration;
        // Latch so the finish signal fires exactly once per play-through
        let did_just_finish = finished && !self.finish_latched.swap(true, Ordering::SeqCst);

        ResourceStatus {
            is_loaded: true,
            position_ms: position.as_millis() as u64,
            duration_ms: Some(self.duration.as_millis() as u64),
            did_just_finish,
        }
    }

    async fn unload(&mut self) {
        self.loaded = false;
        self.started_at = None;
    }
}

/// Loader producing [`ClockResource`] handles.
///
/// Duration comes from the track's `duration_hint` when it parses as a
/// clock string, otherwise from the configured default.
pub struct ClockLoader {
    default_duration: Duration,
}

impl ClockLoader {
    /// Create a loader with a fallback track duration
    pub fn new(default_duration: Duration) -> Self {
        Self { default_duration }
    }
}

impl Default for ClockLoader {
    fn default() -> Self {
        Self::new(Duration::from_secs(180))
    }
}

#[async_trait]
impl ResourceLoader for ClockLoader {
    async fn load(&self, track: &Track, options: LoadOptions) -> Result<Box<dyn PlaybackResource>> {
        let Some(url) = track.audio_url.as_deref() else {
            return Err(PlaybackError::Load {
                reason: format!("track {} has no audio source", track.id),
            });
        };

        let duration = track
            .duration_hint
            .as_deref()
            .and_then(parse_clock)
            .unwrap_or(self.default_duration);
        debug!(track_id = %track.id, url, ?duration, "simulated source ready");

        Ok(Box::new(ClockResource::new(duration, options)))
    }
}

/// Parse "m:ss" / "h:mm:ss" display strings into a duration
fn parse_clock(hint: &str) -> Option<Duration> {
    let mut seconds: u64 = 0;
    for part in hint.split(':') {
        let value: u64 = part.trim().parse().ok()?;
        seconds = seconds * 60 + value;
    }
    Some(Duration::from_secs(seconds))
}
