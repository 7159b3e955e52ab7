/// Playlist domain type
use crate::types::Track;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User-named, user-curated ordered track list.
///
/// Duplicates are allowed and insertion order is meaningful. The JSON
/// layout (`{id, name, tracks}`) is the durable on-disk record, so new
/// fields must stay backwards compatible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Playlist {
    /// Unique playlist identifier
    pub id: String,

    /// Display name chosen by the user
    pub name: String,

    /// Tracks in insertion order
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist with a freshly generated id
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Append a track (duplicates permitted)
    pub fn push_track(&mut self, track: Track) {
        self.tracks.push(track);
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
