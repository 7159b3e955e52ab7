/// Track domain type
use serde::{Deserialize, Serialize};

/// A playable audio item from the catalog (a poem recital, a "tala"
/// performance, an album cut).
///
/// Tracks are immutable values; identity is the `id` field. Two tracks
/// with the same `id` refer to the same catalog entry even if other
/// fields differ, which is how favorites and queue lookups compare them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Performing artist
    pub artist: String,

    /// Pre-formatted duration for display (e.g. "04:32"); never used for
    /// playback math
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_hint: Option<String>,

    /// Opaque reference to the audio source, resolvable by a resource
    /// loader. `None` means the track has no playable audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,

    /// Opaque reference to the cover image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Track {
    /// Create a track with a playable source and no artwork
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        audio_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            duration_hint: None,
            audio_url: Some(audio_url.into()),
            image_url: None,
        }
    }

    /// Check identity (by `id`) regardless of other fields
    pub fn same_track(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
