//! Error types for the playback engine

use thiserror::Error;

/// Playback errors
///
/// Nothing here is fatal to the process: load failures reset the engine
/// to idle, and the remaining variants are translated into logged no-ops
/// by the engine itself.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The track has no resolvable audio source
    #[error("track is not available: {title}")]
    TrackUnavailable {
        /// Title of the unavailable track
        title: String,
    },

    /// The audio source could not be loaded (unreachable or malformed)
    #[error("failed to load audio source: {reason}")]
    Load {
        /// Backend-provided failure description
        reason: String,
    },

    /// No track is currently loaded
    #[error("no track loaded")]
    NoTrackLoaded,

    /// Queue is empty
    #[error("queue is empty")]
    QueueEmpty,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
