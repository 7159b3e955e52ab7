//! Favorites and playlists with write-through persistence

use crate::store::CollectionsBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Mutex;
use talat_core::{Playlist, Track};
use tracing::{debug, warn};

/// Record key for the favorites set
pub const FAVORITES_KEY: &str = "favorites";

/// Record key for the playlists collection
pub const PLAYLISTS_KEY: &str = "playlists";

#[derive(Default)]
struct Collections {
    favorites: Vec<Track>,
    playlists: Vec<Playlist>,
}

/// In-memory favorites and playlists, written through to a durable
/// backend on every mutation.
///
/// Reads are served from memory; a failed write is logged and the session
/// keeps running on the in-memory state.
pub struct CollectionStore {
    backend: Box<dyn CollectionsBackend>,
    inner: Mutex<Collections>,
}

impl CollectionStore {
    /// Load both collections from the backend.
    ///
    /// A missing, unreadable, or corrupt record degrades to an empty
    /// collection with a warning; it is rewritten on the next mutation.
    pub fn load(backend: Box<dyn CollectionsBackend>) -> Self {
        let favorites: Vec<Track> = read_record(backend.as_ref(), FAVORITES_KEY);
        let playlists: Vec<Playlist> = read_record(backend.as_ref(), PLAYLISTS_KEY);
        debug!(
            favorites = favorites.len(),
            playlists = playlists.len(),
            "collections loaded"
        );

        Self {
            backend,
            inner: Mutex::new(Collections {
                favorites,
                playlists,
            }),
        }
    }

    // ===== Favorites =====

    /// Toggle a track's membership in the favorites set (by id).
    ///
    /// Returns the new membership state: `true` if the track was added.
    pub fn toggle_favorite(&self, track: &Track) -> bool {
        let mut inner = self.inner.lock().unwrap();

        let added = match inner.favorites.iter().position(|f| f.id == track.id) {
            Some(index) => {
                inner.favorites.remove(index);
                false
            }
            None => {
                inner.favorites.push(track.clone());
                true
            }
        };

        self.persist(FAVORITES_KEY, &inner.favorites);
        added
    }

    /// Check favorites membership by track id
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.inner
            .lock()
            .unwrap()
            .favorites
            .iter()
            .any(|f| f.id == track_id)
    }

    /// Snapshot of the favorites set
    pub fn favorites(&self) -> Vec<Track> {
        self.inner.lock().unwrap().favorites.clone()
    }

    // ===== Playlists =====

    /// Create a new empty playlist with a freshly generated id
    pub fn create_playlist(&self, name: &str) -> Playlist {
        let playlist = Playlist::new(name);

        let mut inner = self.inner.lock().unwrap();
        inner.playlists.push(playlist.clone());
        self.persist(PLAYLISTS_KEY, &inner.playlists);

        playlist
    }

    /// Append a track to a playlist (duplicates permitted).
    ///
    /// Unknown playlist ids are a logged no-op; returns whether the track
    /// was added.
    pub fn add_to_playlist(&self, playlist_id: &str, track: Track) -> bool {
        let mut inner = self.inner.lock().unwrap();

        match inner.playlists.iter_mut().find(|p| p.id == playlist_id) {
            Some(playlist) => {
                playlist.push_track(track);
                self.persist(PLAYLISTS_KEY, &inner.playlists);
                true
            }
            None => {
                warn!(playlist_id, "unknown playlist; track not added");
                false
            }
        }
    }

    /// Snapshot of all playlists
    pub fn playlists(&self) -> Vec<Playlist> {
        self.inner.lock().unwrap().playlists.clone()
    }

    /// Look up a playlist by id
    pub fn playlist(&self, id: &str) -> Option<Playlist> {
        self.inner
            .lock()
            .unwrap()
            .playlists
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    fn persist(&self, key: &str, value: &impl Serialize) {
        match serde_json::to_string(value) {
            Ok(raw) => {
                if let Err(err) = self.backend.write(key, &raw) {
                    warn!(key, error = %err, "persist failed; in-memory state stays authoritative");
                }
            }
            Err(err) => warn!(key, error = %err, "record serialization failed"),
        }
    }
}

fn read_record<T: DeserializeOwned + Default>(backend: &dyn CollectionsBackend, key: &str) -> T {
    match backend.read(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "corrupt record; starting empty");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, error = %err, "record unreadable; starting empty");
            T::default()
        }
    }
}
