//! Talat Player - Playback Engine
//!
//! Queue-aware audio playback for the Talat catalog app.
//!
//! This crate provides:
//! - A single-resource playback engine with an `Idle → Loading → Playing
//!   ⇄ Paused` lifecycle and stale-load cancellation
//! - Queue navigation with shuffle and wrap-around semantics
//! - Repeat-one handled as an explicit finish branch (never a queue
//!   concern)
//! - Favorites and playlist mutations delegated to `talat-storage`
//! - A mini-player binding that renders display-ready state and forwards
//!   tap intents
//!
//! # Architecture
//!
//! The engine is platform-agnostic: the actual audio backend is injected
//! as a [`ResourceLoader`], and the UI only ever reads
//! [`PlaybackSnapshot`] values and calls engine methods. A wall-clock
//! simulated backend ([`ClockLoader`]) is provided for shells and demos.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use talat_core::Track;
//! use talat_playback::{ClockLoader, PlaybackConfig, PlaybackEngine};
//! use talat_storage::{CollectionStore, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> talat_playback::Result<()> {
//!     let engine = Arc::new(PlaybackEngine::new(
//!         Box::new(ClockLoader::new(Duration::from_secs(180))),
//!         CollectionStore::load(Box::new(MemoryStore::new())),
//!         PlaybackConfig::default(),
//!     ));
//!
//!     let track = Track::new("t1", "Qasida", "Poet A", "https://cdn/t1.mp3");
//!     engine.play_track(track, None).await?;
//!     assert!(engine.snapshot().is_playing());
//!
//!     engine.clear_current_track().await;
//!     assert!(engine.snapshot().current_track.is_none());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod clock;
mod engine;
mod error;
mod mini_player;
mod queue;
mod resource;
pub mod types;

pub use clock::{ClockLoader, ClockResource};
pub use engine::PlaybackEngine;
pub use error::{PlaybackError, Result};
pub use mini_player::{MiniPlayer, PlayerView};
pub use queue::QueueManager;
pub use resource::{LoadOptions, PlaybackResource, ResourceLoader, ResourceStatus};
pub use types::{PlaybackConfig, PlaybackPhase, PlaybackSnapshot};
