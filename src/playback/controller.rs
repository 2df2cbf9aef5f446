//! Playback-state coordinator
//!
//! Owns one media source, relays position/duration updates to the injected
//! listener at a fixed cadence, and exposes the command surface (load, play,
//! pause, seek, reset, release) plus the resume/suspend lifecycle hooks the
//! UI Shell calls on its own triggers.
//!
//! Failure policy: every fallible source interaction is caught here, logged
//! through the listener and tracing, and swallowed. Commands never propagate
//! errors to the caller and never leave the source half-initialized.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex, RwLock};
use tracing::{debug, warn};

use super::ticker::PositionTicker;
use crate::listener::PlaybackInfoListener;
use crate::source::{CompletionReceiver, MediaSource, SourceFactory};
use crate::state::PlaybackState;

/// Default cadence of position updates while playing.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Construction-time controller settings.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Position update cadence while playing
    pub tick_interval: Duration,
    /// Replay from the start when a play-through completes
    pub looping: bool,
    /// Keep playing across a `suspend` lifecycle hook
    pub background_audio: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            looping: false,
            background_audio: true,
        }
    }
}

/// The playback-state coordinator.
///
/// Cheap to clone; all clones share one session. Every command is async and
/// returns without blocking the caller.
#[derive(Clone)]
pub struct PlaybackController {
    inner: Arc<Inner>,
}

struct Inner {
    factory: Box<dyn SourceFactory>,
    listener: RwLock<Arc<dyn PlaybackInfoListener>>,

    /// Presence of the handle is the load/release invariant: commands other
    /// than `load` are no-ops while this is `None`.
    source: Mutex<Option<Box<dyn MediaSource>>>,

    state: RwLock<PlaybackState>,
    current_path: RwLock<Option<PathBuf>>,
    looping: AtomicBool,
    background_audio: AtomicBool,
    ticker: PositionTicker,
}

impl PlaybackController {
    pub fn new(
        factory: Box<dyn SourceFactory>,
        listener: Arc<dyn PlaybackInfoListener>,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                factory,
                listener: RwLock::new(listener),
                source: Mutex::new(None),
                state: RwLock::new(PlaybackState::Invalid),
                current_path: RwLock::new(None),
                looping: AtomicBool::new(settings.looping),
                background_audio: AtomicBool::new(settings.background_audio),
                ticker: PositionTicker::new(settings.tick_interval),
            }),
        }
    }

    /// Bind and prepare a media file.
    ///
    /// Constructs the source on first use. Failures surface only as log
    /// events; the session state is left unchanged and the controller stays
    /// usable for a subsequent `load`.
    pub async fn load<P: AsRef<Path>>(&self, path: P) {
        self.inner.load(path.as_ref().to_path_buf()).await;
    }

    /// Start playback. No-op when already playing or nothing is loaded.
    pub async fn play(&self) {
        self.inner.play().await;
    }

    /// Pause playback. No-op when not playing.
    pub async fn pause(&self) {
        self.inner.pause().await;
    }

    /// Play/pause flip, the way a single transport button behaves.
    pub async fn toggle(&self) {
        if self.is_playing().await {
            self.pause().await;
        } else {
            self.play().await;
        }
    }

    /// Reset the source and reload `path`. No-op when nothing is loaded.
    pub async fn reset<P: AsRef<Path>>(&self, path: P) {
        self.inner.reset(path.as_ref().to_path_buf()).await;
    }

    /// Jump to a position, in any play state. No-op when nothing is loaded.
    pub async fn seek(&self, position_ms: u64) {
        self.inner.seek(position_ms).await;
    }

    /// Drop the media source. Idempotent; only `load` revives the session.
    pub async fn release(&self) {
        self.inner.release().await;
    }

    pub async fn is_playing(&self) -> bool {
        let source = self.inner.source.lock().await;
        source.as_ref().map(|s| s.is_playing()).unwrap_or(false)
    }

    pub async fn state(&self) -> PlaybackState {
        *self.inner.state.read().await
    }

    /// Current position in milliseconds (0 when nothing is loaded).
    pub async fn position(&self) -> u64 {
        let source = self.inner.source.lock().await;
        source.as_ref().map(|s| s.position()).unwrap_or(0)
    }

    /// Duration of the loaded media in milliseconds (0 when unknown).
    pub async fn duration(&self) -> u64 {
        let source = self.inner.source.lock().await;
        source.as_ref().map(|s| s.duration()).unwrap_or(0)
    }

    pub async fn set_looping(&self, enabled: bool) {
        self.inner.looping.store(enabled, Ordering::SeqCst);
        self.inner.log(&format!("loop: {enabled}")).await;
    }

    pub fn is_looping(&self) -> bool {
        self.inner.looping.load(Ordering::SeqCst)
    }

    pub async fn set_background_audio(&self, enabled: bool) {
        self.inner.background_audio.store(enabled, Ordering::SeqCst);
        self.inner.log(&format!("background audio: {enabled}")).await;
    }

    pub fn background_audio(&self) -> bool {
        self.inner.background_audio.load(Ordering::SeqCst)
    }

    /// Lifecycle hook for the UI Shell's foreground trigger: reload the
    /// remembered media. No-op when nothing was ever loaded.
    pub async fn resume(&self) {
        let path = self.inner.current_path.read().await.clone();
        match path {
            Some(path) => {
                self.inner.log("resume: reloading media").await;
                self.inner.load(path).await;
            }
            None => self.inner.log("resume: no media to load").await,
        }
    }

    /// Lifecycle hook for the UI Shell's background trigger. With background
    /// audio enabled playback continues untouched; otherwise the session is
    /// reset and released. Idempotent.
    pub async fn suspend(&self) {
        if self.background_audio() {
            self.inner
                .log("suspend: background audio enabled, playback continues")
                .await;
            return;
        }
        let path = self.inner.current_path.read().await.clone();
        if let Some(path) = path {
            self.inner.reset(path).await;
        }
        self.inner.release().await;
    }

    /// Swap the injected listener. Events emitted after this call reach the
    /// new listener only.
    pub async fn set_listener(&self, listener: Arc<dyn PlaybackInfoListener>) {
        *self.inner.listener.write().await = listener;
    }
}

impl Inner {
    async fn listener(&self) -> Arc<dyn PlaybackInfoListener> {
        self.listener.read().await.clone()
    }

    async fn log(&self, message: &str) {
        debug!("{message}");
        self.listener().await.on_log_updated(message);
    }

    async fn set_state(&self, state: PlaybackState) {
        *self.state.write().await = state;
        debug!("state changed: {state}");
        self.listener().await.on_state_changed(state);
    }

    async fn load(self: &Arc<Self>, path: PathBuf) {
        let mut source = self.source.lock().await;

        if source.is_none() {
            match self.factory.create() {
                Ok(mut src) => {
                    let (tx, rx) = mpsc::unbounded_channel();
                    src.set_completion_sender(tx);
                    self.spawn_completion_watcher(rx);
                    *source = Some(src);
                    self.log("created media source").await;
                }
                Err(e) => {
                    warn!("media source construction failed: {e}");
                    self.log(&e.to_string()).await;
                    return;
                }
            }
        }

        self.log(&format!("load: {}", path.display())).await;
        *self.current_path.write().await = Some(path.clone());

        // set_source/prepare may block on file I/O and decoder probing; run
        // them off the async threads while the command lock stays held.
        let Some(mut src) = source.take() else { return };
        let target = path.clone();
        let joined = tokio::task::spawn_blocking(move || {
            if let Err(e) = src.set_source(&target) {
                return (src, Err(e));
            }
            let result = src.prepare();
            (src, result)
        })
        .await;

        let (src, result) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                warn!("load task failed: {e}");
                self.log("load failed: media source lost").await;
                return;
            }
        };
        *source = Some(src);

        match result {
            Ok(()) => {
                let duration = source.as_ref().map(|s| s.duration()).unwrap_or(0);
                drop(source);
                let listener = self.listener().await;
                listener.on_duration_changed(duration);
                listener.on_position_changed(0);
                self.log(&format!("load: prepared, duration {duration} ms"))
                    .await;
            }
            Err(e) => {
                drop(source);
                warn!("load failed: {e}");
                self.log(&e.to_string()).await;
            }
        }
    }

    async fn play(self: &Arc<Self>) {
        {
            let mut source = self.source.lock().await;
            let Some(src) = source.as_mut() else { return };
            if src.is_playing() {
                return;
            }
            src.start();
        }
        let path = self.current_path.read().await.clone();
        self.log(&format!(
            "play: {}",
            path.map(|p| p.display().to_string()).unwrap_or_default()
        ))
        .await;
        self.set_state(PlaybackState::Playing).await;
        self.start_ticker().await;
    }

    async fn pause(&self) {
        {
            let mut source = self.source.lock().await;
            let Some(src) = source.as_mut() else { return };
            if !src.is_playing() {
                return;
            }
            src.pause();
        }
        self.set_state(PlaybackState::Paused).await;
        self.log("pause").await;
        self.stop_ticker(false).await;
    }

    async fn reset(self: &Arc<Self>, path: PathBuf) {
        {
            let mut source = self.source.lock().await;
            let Some(src) = source.as_mut() else { return };
            src.reset();
        }
        self.log("reset").await;
        self.load(path).await;
        self.set_state(PlaybackState::Reset).await;
        self.stop_ticker(true).await;
    }

    async fn seek(&self, position_ms: u64) {
        let mut source = self.source.lock().await;
        let Some(src) = source.as_mut() else { return };
        src.seek(position_ms);
        drop(source);
        self.log(&format!("seek: {position_ms} ms")).await;
    }

    async fn release(&self) {
        self.stop_ticker(false).await;
        let mut source = self.source.lock().await;
        if source.take().is_some() {
            drop(source);
            self.log("released media source").await;
        }
    }

    async fn start_ticker(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.ticker
            .start(move || {
                let weak = weak.clone();
                async move {
                    match weak.upgrade() {
                        Some(inner) => {
                            inner.position_tick().await;
                            true
                        }
                        None => false,
                    }
                }
            })
            .await;
    }

    /// One ticker firing: read the position only while the source reports
    /// itself playing. A failed or skipped read just skips the tick.
    async fn position_tick(&self) {
        let source = self.source.lock().await;
        let Some(src) = source.as_ref() else { return };
        if !src.is_playing() {
            return;
        }
        let position = src.position();
        drop(source);
        self.listener().await.on_position_changed(position);
    }

    async fn stop_ticker(&self, reset_position: bool) {
        self.ticker.stop().await;
        if reset_position {
            self.listener().await.on_position_changed(0);
        }
    }

    fn spawn_completion_watcher(self: &Arc<Self>, mut rx: CompletionReceiver) {
        let weak = Arc::downgrade(self);
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                let Some(inner) = weak.upgrade() else { break };
                inner.handle_completion().await;
            }
        });
    }

    /// Natural end of a play-through: stop the ticker with a position reset,
    /// report Completed, then either loop or settle into the
    /// paused-equivalent resting state.
    async fn handle_completion(self: &Arc<Self>) {
        self.stop_ticker(true).await;
        self.log("playback completed").await;
        self.set_state(PlaybackState::Completed).await;
        self.listener().await.on_playback_completed();

        if self.looping.load(Ordering::SeqCst) {
            // Loop re-entry goes through the same command path as an
            // external play(), guards included.
            self.play().await;
        } else {
            self.set_state(PlaybackState::Paused).await;
        }
    }
}
