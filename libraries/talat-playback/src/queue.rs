//! Queue navigation
//!
//! Pure computation of next/previous indices under shuffle; the engine
//! owns when navigation actually happens. Repeat-one is deliberately not
//! a queue concern — a finished track under repeat is replayed in place
//! by the engine without consulting the queue.

use rand::Rng;
use talat_core::Track;

/// Ordered list of tracks eligible for next/previous navigation, plus the
/// current position.
///
/// The queue is replaced wholesale when playback starts from a new context
/// (an album, a poet's poems, a playlist); it is never spliced mid-play.
///
/// Invariant: non-empty queue implies `0 <= current_index < len`.
#[derive(Debug, Clone, Default)]
pub struct QueueManager {
    tracks: Vec<Track>,
    current: Option<usize>,
}

impl QueueManager {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale.
    ///
    /// `start_index` must reference a track in `tracks`; out-of-range or
    /// absent values default to 0 when `tracks` is non-empty.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: Option<usize>) {
        self.current = if tracks.is_empty() {
            None
        } else {
            Some(start_index.filter(|i| *i < tracks.len()).unwrap_or(0))
        };
        self.tracks = tracks;
    }

    /// Index the next track would play from.
    ///
    /// Shuffle picks a uniformly random index and may land on the current
    /// one (observed behavior of the product, kept as-is); sequential
    /// navigation wraps past the end. `None` when the queue is empty.
    pub fn next(&self, is_shuffle: bool) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        if is_shuffle {
            Some(rand::thread_rng().gen_range(0..len))
        } else {
            Some((self.current.unwrap_or(0) + 1) % len)
        }
    }

    /// Index the previous track would play from; wraps to the last track
    /// at the start. `None` when the queue is empty.
    pub fn previous(&self, is_shuffle: bool) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        if is_shuffle {
            Some(rand::thread_rng().gen_range(0..len))
        } else {
            let current = self.current.unwrap_or(0);
            Some(if current == 0 { len - 1 } else { current - 1 })
        }
    }

    /// Move the current position; out-of-range indices are rejected
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Current position, `None` when empty
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Track at the current position
    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Track at an index
    pub fn track_at(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Find a track's position by id
    pub fn position_of(&self, track_id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == track_id)
    }

    /// All queued tracks in order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of queued tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
