//! Talat Player - Persistent Collections
//!
//! User-curated state that must survive process restarts: the favorites
//! set and the named playlists. Both are held in memory and written
//! through to a durable string-keyed backend on every mutation.
//!
//! The on-disk format is two JSON records:
//! - `favorites`: array of `Track`
//! - `playlists`: array of `{id, name, tracks}`
//!
//! Playback never blocks on persistence: a failed write is logged and the
//! in-memory state stays authoritative for the session (the next mutation
//! rewrites the whole record anyway).

#![forbid(unsafe_code)]

mod collections;
mod error;
mod store;

pub use collections::{CollectionStore, FAVORITES_KEY, PLAYLISTS_KEY};
pub use error::{Result, StorageError};
pub use store::{CollectionsBackend, JsonFileStore, MemoryStore};
