//! Talat Player Core
//!
//! Domain types shared by the playback and storage crates.
//!
//! The catalog side of the application (albums, poets, photo/video media)
//! lives elsewhere; this crate only defines what the playback engine and
//! the persisted collections need: [`Track`] and [`Playlist`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod types;

pub use types::{Playlist, Track};
