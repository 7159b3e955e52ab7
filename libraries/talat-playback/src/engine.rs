//! Playback engine - core orchestration
//!
//! Coordinates the single live resource, queue navigation, and the
//! persisted collections. The engine is an explicitly constructed service
//! (no globals): callers hold an `Arc<PlaybackEngine>` and every method
//! takes `&self`, so any UI event handler can call straight into it.
//!
//! Concurrency model: engine state lives behind a `std::sync::Mutex` and
//! is only locked for short, non-awaiting sections, which keeps snapshot
//! reads cheap at any polling frequency. The resource slot lives behind a
//! `tokio::sync::Mutex` so playback-affecting operations serialize against
//! the one live handle. Loads are raced through a generation token: every
//! teardown-and-load bumps it, and a resolving load is only installed if
//! its token is still current — a superseded load unloads its own resource
//! instead of resurrecting a stale track.

use crate::{
    error::{PlaybackError, Result},
    queue::QueueManager,
    resource::{LoadOptions, PlaybackResource, ResourceLoader},
    types::{PlaybackConfig, PlaybackPhase, PlaybackSnapshot},
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use talat_core::{Playlist, Track};
use talat_storage::CollectionStore;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, warn};

/// Fixed skip offset for `skip_forward`/`skip_backward`
const SKIP_OFFSET_MS: u64 = 15_000;

struct EngineState {
    phase: PlaybackPhase,
    current_track: Option<Track>,
    position_ms: u64,
    duration_ms: Option<u64>,
    is_shuffle: bool,
    is_repeat: bool,
    queue: QueueManager,
}

enum Direction {
    Next,
    Previous,
}

/// Central playback service.
///
/// Owns the one live [`PlaybackResource`] and the current queue; UI layers
/// read state through [`PlaybackEngine::snapshot`] and never touch the
/// resource directly.
pub struct PlaybackEngine {
    loader: Box<dyn ResourceLoader>,
    collections: CollectionStore,
    state: Mutex<EngineState>,
    resource: AsyncMutex<Option<Box<dyn PlaybackResource>>>,
    generation: AtomicU64,
}

impl PlaybackEngine {
    /// Create an engine with injected resource loader and collections
    pub fn new(
        loader: Box<dyn ResourceLoader>,
        collections: CollectionStore,
        config: PlaybackConfig,
    ) -> Self {
        Self {
            loader,
            collections,
            state: Mutex::new(EngineState {
                phase: PlaybackPhase::Idle,
                current_track: None,
                position_ms: 0,
                duration_ms: None,
                is_shuffle: config.shuffle,
                is_repeat: config.repeat,
                queue: QueueManager::new(),
            }),
            resource: AsyncMutex::new(None),
            generation: AtomicU64::new(0),
        }
    }

    // ===== Playback Control =====

    /// Start playing a track, replacing the queue wholesale.
    ///
    /// `queue` is the navigation context (album, poet's poems, playlist);
    /// when absent the queue is just the track itself. Any in-flight load
    /// is superseded and any live resource is torn down first. On failure
    /// the engine resets to idle and the error is returned for the UI to
    /// surface as a notice.
    pub async fn play_track(&self, track: Track, queue: Option<Vec<Track>>) -> Result<()> {
        let tracks = queue.unwrap_or_else(|| vec![track.clone()]);
        {
            let mut state = self.state.lock().unwrap();
            let start = tracks.iter().position(|t| t.id == track.id);
            state.queue.set_queue(tracks, start);
        }

        self.load_and_play(track).await
    }

    /// `Playing ⇄ Paused`; no-op when nothing is loaded
    pub async fn toggle_play_pause(&self) {
        let mut slot = self.resource.lock().await;
        let Some(resource) = slot.as_mut() else {
            debug!("toggle ignored: nothing loaded");
            return;
        };

        let mut state = self.state.lock().unwrap();
        match state.phase {
            PlaybackPhase::Playing => {
                resource.pause();
                state.phase = PlaybackPhase::Paused;
            }
            PlaybackPhase::Paused => {
                resource.play();
                state.phase = PlaybackPhase::Playing;
            }
            PlaybackPhase::Idle | PlaybackPhase::Loading => {}
        }
    }

    /// Seek to a position in the current track.
    ///
    /// Clamps to `[0, duration]`; a no-op (logged) when nothing is loaded.
    /// If playback was running it keeps running — seeking never silently
    /// pauses.
    pub async fn seek_to(&self, position_ms: u64) {
        let was_playing = self.state.lock().unwrap().phase == PlaybackPhase::Playing;

        let mut slot = self.resource.lock().await;
        let Some(resource) = slot.as_mut() else {
            debug!(position_ms, "seek ignored: nothing loaded");
            return;
        };

        let status = resource.status();
        let target = match status.duration_ms {
            Some(duration) => position_ms.min(duration),
            None => position_ms,
        };

        if let Err(err) = resource.seek(target).await {
            warn!(target, error = %err, "seek failed");
            return;
        }
        if was_playing {
            resource.play();
        }

        self.state.lock().unwrap().position_ms = target;
    }

    /// Advance to the queue's next track (random under shuffle).
    ///
    /// Empty queue is a logged no-op, never an error.
    pub async fn play_next(&self) -> Result<()> {
        self.navigate(Direction::Next).await
    }

    /// Go to the queue's previous track, wrapping at the start
    pub async fn play_previous(&self) -> Result<()> {
        self.navigate(Direction::Previous).await
    }

    async fn navigate(&self, direction: Direction) -> Result<()> {
        let target = {
            let mut state = self.state.lock().unwrap();
            let index = match direction {
                Direction::Next => state.queue.next(state.is_shuffle),
                Direction::Previous => state.queue.previous(state.is_shuffle),
            };
            let Some(index) = index else {
                debug!("navigation ignored: queue is empty");
                return Ok(());
            };

            let Some(track) = state.queue.track_at(index).cloned() else {
                return Ok(());
            };
            state.queue.select(index);
            track
        };

        self.load_and_play(target).await
    }

    /// Skip forward by the fixed 15-second offset
    pub async fn skip_forward(&self) {
        if let Some(position) = self.resource_position().await {
            self.seek_to(position.saturating_add(SKIP_OFFSET_MS)).await;
        }
    }

    /// Skip backward by the fixed 15-second offset
    pub async fn skip_backward(&self) {
        if let Some(position) = self.resource_position().await {
            self.seek_to(position.saturating_sub(SKIP_OFFSET_MS)).await;
        }
    }

    /// Unload the resource and return to idle; the queue and the persisted
    /// collections are left untouched
    pub async fn clear_current_track(&self) {
        // Bump the token first so an in-flight load resolves as stale
        self.generation.fetch_add(1, Ordering::SeqCst);

        let old = self.resource.lock().await.take();
        if let Some(mut resource) = old {
            resource.unload().await;
        }

        let mut state = self.state.lock().unwrap();
        state.phase = PlaybackPhase::Idle;
        state.current_track = None;
        state.position_ms = 0;
        state.duration_ms = None;
    }

    /// Tear down the engine at end of life; equivalent to
    /// [`PlaybackEngine::clear_current_track`]
    pub async fn dispose(&self) {
        self.clear_current_track().await;
        info!("playback engine disposed");
    }

    // ===== Flags =====

    /// Flip shuffle; affects future navigation only, never the current
    /// track or position
    pub fn toggle_shuffle(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.is_shuffle = !state.is_shuffle;
        state.is_shuffle
    }

    /// Flip repeat; a finished track replays in place while set
    pub fn toggle_repeat(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        state.is_repeat = !state.is_repeat;
        state.is_repeat
    }

    // ===== Status polling =====

    /// Refresh position/duration from the live resource and handle a
    /// finished track.
    ///
    /// The UI drives this periodically (the mobile app polled at ~1s; any
    /// frequency is safe). Finish dispatch has exactly two branches:
    /// repeat-one replays in place without consulting the queue, otherwise
    /// the engine auto-advances like `play_next`. A finished track with an
    /// empty queue returns the engine to idle.
    pub async fn poll_status(&self) -> PlaybackSnapshot {
        let finished = {
            let mut slot = self.resource.lock().await;
            match slot.as_mut() {
                Some(resource) => {
                    let status = resource.status();
                    if status.is_loaded {
                        let mut state = self.state.lock().unwrap();
                        state.position_ms = status.position_ms;
                        state.duration_ms = status.duration_ms;
                    }
                    status.did_just_finish
                }
                None => false,
            }
        };

        if finished {
            self.handle_finished().await;
        }

        self.snapshot()
    }

    async fn handle_finished(&self) {
        let is_repeat = self.state.lock().unwrap().is_repeat;

        if is_repeat {
            // Repeat-one: replay in place, the queue is not consulted
            let mut slot = self.resource.lock().await;
            if let Some(resource) = slot.as_mut() {
                if let Err(err) = resource.seek(0).await {
                    warn!(error = %err, "repeat replay failed");
                    return;
                }
                resource.play();
                let mut state = self.state.lock().unwrap();
                state.position_ms = 0;
                state.phase = PlaybackPhase::Playing;
            }
            return;
        }

        let queue_empty = self.state.lock().unwrap().queue.is_empty();
        if queue_empty {
            debug!("track finished with empty queue; going idle");
            self.clear_current_track().await;
            return;
        }

        if let Err(err) = self.play_next().await {
            warn!(error = %err, "auto-advance failed");
        }
    }

    // ===== Collections =====

    /// Toggle favorites membership; independent of playback state.
    /// Returns the new membership.
    pub fn toggle_favorite(&self, track: &Track) -> bool {
        self.collections.toggle_favorite(track)
    }

    /// Check favorites membership by track id
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.collections.is_favorite(track_id)
    }

    /// Snapshot of the favorites set
    pub fn favorites(&self) -> Vec<Track> {
        self.collections.favorites()
    }

    /// Create a new named playlist
    pub fn create_playlist(&self, name: &str) -> Playlist {
        self.collections.create_playlist(name)
    }

    /// Append a track to a playlist; unknown ids are a logged no-op
    pub fn add_to_playlist(&self, playlist_id: &str, track: Track) -> bool {
        self.collections.add_to_playlist(playlist_id, track)
    }

    /// Snapshot of all playlists
    pub fn playlists(&self) -> Vec<Playlist> {
        self.collections.playlists()
    }

    // ===== State queries =====

    /// Cheap, side-effect-free view of the current playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        let state = self.state.lock().unwrap();
        PlaybackSnapshot {
            current_track: state.current_track.clone(),
            phase: state.phase,
            position_ms: state.position_ms,
            duration_ms: state.duration_ms,
            is_shuffle: state.is_shuffle,
            is_repeat: state.is_repeat,
        }
    }

    /// Tracks currently eligible for next/previous navigation
    pub fn queue_tracks(&self) -> Vec<Track> {
        self.state.lock().unwrap().queue.tracks().to_vec()
    }

    // ===== Internal =====

    /// Teardown-then-load sequence shared by `play_track` and navigation.
    ///
    /// At most one resource is ever live: the previous handle is unloaded
    /// before the new load starts, and a load that resolves after being
    /// superseded unloads its own resource and is discarded.
    async fn load_and_play(&self, track: Track) -> Result<()> {
        if track.audio_url.is_none() {
            warn!(track_id = %track.id, "track has no audio source");
            self.clear_current_track().await;
            return Err(PlaybackError::TrackUnavailable {
                title: track.title.clone(),
            });
        }

        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let old = self.resource.lock().await.take();
        if let Some(mut resource) = old {
            resource.unload().await;
        }

        {
            let mut state = self.state.lock().unwrap();
            state.phase = PlaybackPhase::Loading;
            state.current_track = Some(track.clone());
            state.position_ms = 0;
            state.duration_ms = None;
        }

        debug!(track_id = %track.id, "loading audio source");
        let options = LoadOptions::default();

        match self.loader.load(&track, options).await {
            Ok(mut resource) => {
                let mut slot = self.resource.lock().await;
                if self.generation.load(Ordering::SeqCst) != token {
                    debug!(track_id = %track.id, "discarding superseded load");
                    resource.unload().await;
                    return Ok(());
                }

                resource.play();
                let status = resource.status();
                *slot = Some(resource);

                let mut state = self.state.lock().unwrap();
                state.phase = PlaybackPhase::Playing;
                state.position_ms = 0;
                state.duration_ms = status.duration_ms;
                info!(track_id = %track.id, title = %track.title, "playback started");
                Ok(())
            }
            Err(err) => {
                warn!(track_id = %track.id, error = %err, "failed to load track");
                if self.generation.load(Ordering::SeqCst) == token {
                    let mut state = self.state.lock().unwrap();
                    state.phase = PlaybackPhase::Idle;
                    state.current_track = None;
                    state.position_ms = 0;
                    state.duration_ms = None;
                }
                Err(err)
            }
        }
    }

    async fn resource_position(&self) -> Option<u64> {
        let slot = self.resource.lock().await;
        let resource = slot.as_ref()?;
        Some(resource.status().position_ms)
    }
}
