//! Shared test doubles for engine tests
//!
//! `FakeLoader` produces scripted in-memory resources and keeps enough
//! bookkeeping to verify the engine's resource-lifecycle invariants:
//! every created resource counts as live until unloaded, loads can be
//! gated (held in flight) or made to fail, and track finishes are
//! triggered from the test.

// Each test binary uses a different slice of the helpers
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use talat_core::Track;
use talat_playback::{LoadOptions, PlaybackError, PlaybackResource, ResourceLoader, ResourceStatus};
use tokio::sync::Notify;

/// URL prefix that makes a load fail
pub const BROKEN_URL: &str = "broken://";

pub struct FakeResource {
    id: String,
    duration_ms: u64,
    position_ms: u64,
    unloaded: bool,
    live: Arc<AtomicUsize>,
    finish_flag: Arc<AtomicBool>,
    play_log: Arc<Mutex<Vec<String>>>,
    seek_log: Arc<Mutex<Vec<u64>>>,
}

#[async_trait]
impl PlaybackResource for FakeResource {
    fn play(&mut self) {
        if !self.unloaded {
            self.play_log.lock().unwrap().push(self.id.clone());
        }
    }

    fn pause(&mut self) {}

    async fn seek(&mut self, position_ms: u64) -> talat_playback::Result<()> {
        if self.unloaded {
            return Err(PlaybackError::NoTrackLoaded);
        }
        self.position_ms = position_ms.min(self.duration_ms);
        self.seek_log.lock().unwrap().push(self.position_ms);
        Ok(())
    }

    fn status(&self) -> ResourceStatus {
        if self.unloaded {
            return ResourceStatus::default();
        }
        ResourceStatus {
            is_loaded: true,
            position_ms: self.position_ms,
            duration_ms: Some(self.duration_ms),
            did_just_finish: self.finish_flag.swap(false, Ordering::SeqCst),
        }
    }

    async fn unload(&mut self) {
        if !self.unloaded {
            self.unloaded = true;
            self.live.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

/// Scripted loader shared between the engine and the test body
#[derive(Clone, Default)]
pub struct FakeLoader {
    duration_ms: u64,
    live: Arc<AtomicUsize>,
    max_live: Arc<AtomicUsize>,
    gates: Arc<Mutex<HashMap<String, Arc<Notify>>>>,
    finish_flags: Arc<Mutex<HashMap<String, Arc<AtomicBool>>>>,
    load_log: Arc<Mutex<Vec<String>>>,
    play_log: Arc<Mutex<Vec<String>>>,
    seek_log: Arc<Mutex<Vec<u64>>>,
}

impl FakeLoader {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            ..Self::default()
        }
    }

    /// Number of resources currently live
    pub fn live(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }

    /// High-water mark of simultaneously live resources
    pub fn max_live(&self) -> usize {
        self.max_live.load(Ordering::SeqCst)
    }

    /// Hold the next load of `track_id` in flight until the returned gate
    /// is released with `notify_one`
    pub fn gate(&self, track_id: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(track_id.to_string(), Arc::clone(&notify));
        notify
    }

    /// Simulate the currently loaded copy of `track_id` reaching its end;
    /// the next status poll observes `did_just_finish`
    pub fn finish(&self, track_id: &str) {
        if let Some(flag) = self.finish_flags.lock().unwrap().get(track_id) {
            flag.store(true, Ordering::SeqCst);
        }
    }

    /// Track ids in load order
    pub fn loads(&self) -> Vec<String> {
        self.load_log.lock().unwrap().clone()
    }

    /// Track ids in the order their resources were told to play
    pub fn plays(&self) -> Vec<String> {
        self.play_log.lock().unwrap().clone()
    }

    /// Seek targets observed by any resource
    pub fn seeks(&self) -> Vec<u64> {
        self.seek_log.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceLoader for FakeLoader {
    async fn load(&self, track: &Track, options: LoadOptions) -> talat_playback::Result<Box<dyn PlaybackResource>> {
        let gate = self.gates.lock().unwrap().remove(&track.id);
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let url = track.audio_url.as_deref().unwrap_or_default();
        if url.starts_with(BROKEN_URL) {
            return Err(PlaybackError::Load {
                reason: format!("unreachable source: {url}"),
            });
        }

        let finish_flag = Arc::clone(
            self.finish_flags
                .lock()
                .unwrap()
                .entry(track.id.clone())
                .or_default(),
        );
        finish_flag.store(false, Ordering::SeqCst);

        self.load_log.lock().unwrap().push(track.id.clone());
        let live = self.live.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_live.fetch_max(live, Ordering::SeqCst);

        Ok(Box::new(FakeResource {
            id: track.id.clone(),
            duration_ms: self.duration_ms,
            position_ms: options.start_position_ms,
            unloaded: false,
            live: Arc::clone(&self.live),
            finish_flag,
            play_log: Arc::clone(&self.play_log),
            seek_log: Arc::clone(&self.seek_log),
        }))
    }
}

/// Catalog-style test track with a playable source
pub fn create_track(id: &str) -> Track {
    Track::new(
        id,
        format!("Track {id}"),
        "Test Artist",
        format!("https://cdn/{id}.mp3"),
    )
}
