//! Shared test fixtures: a scripted media source and a recording listener.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use reprise::error::Error;
use reprise::source::{CompletionSender, MediaSource, SourceFactory};
use reprise::{
    ControllerSettings, PlaybackController, PlaybackInfoListener, PlaybackState, Result,
};

// ============================================================================
// Scripted media source
// ============================================================================

#[derive(Default)]
struct MockState {
    playing: bool,
    prepared: bool,
    position_ms: u64,
    duration_ms: u64,
    loaded_path: Option<PathBuf>,
    completion_tx: Option<CompletionSender>,
    start_calls: usize,
    pause_calls: usize,
    reset_calls: usize,
    seek_calls: Vec<u64>,
    sources_created: usize,
}

/// Shared handle the tests use to script and inspect the mock source.
#[derive(Clone, Default)]
pub struct MockHandle {
    state: Arc<Mutex<MockState>>,
}

impl MockHandle {
    pub fn set_position(&self, position_ms: u64) {
        self.state.lock().unwrap().position_ms = position_ms;
    }

    /// Script the playing flag directly (e.g. an output stall) without
    /// delivering a completion notification.
    pub fn set_playing(&self, playing: bool) {
        self.state.lock().unwrap().playing = playing;
    }

    /// Deliver the one-shot completion notification, ending the current
    /// play-through the way a real source does.
    pub fn fire_completion(&self) {
        let mut state = self.state.lock().unwrap();
        state.playing = false;
        state.position_ms = 0;
        if let Some(tx) = &state.completion_tx {
            let _ = tx.send(());
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    pub fn loaded_path(&self) -> Option<PathBuf> {
        self.state.lock().unwrap().loaded_path.clone()
    }

    pub fn start_calls(&self) -> usize {
        self.state.lock().unwrap().start_calls
    }

    pub fn pause_calls(&self) -> usize {
        self.state.lock().unwrap().pause_calls
    }

    pub fn reset_calls(&self) -> usize {
        self.state.lock().unwrap().reset_calls
    }

    pub fn seek_calls(&self) -> Vec<u64> {
        self.state.lock().unwrap().seek_calls.clone()
    }

    pub fn sources_created(&self) -> usize {
        self.state.lock().unwrap().sources_created
    }
}

struct MockSource {
    handle: MockHandle,
    duration_ms: u64,
    fail_paths: Vec<String>,
}

impl MediaSource for MockSource {
    fn set_source(&mut self, path: &Path) -> Result<()> {
        let name = path.to_string_lossy().to_string();
        if self.fail_paths.iter().any(|f| name.contains(f.as_str())) {
            return Err(Error::Source(format!("{name}: no such file")));
        }
        self.handle.state.lock().unwrap().loaded_path = Some(path.to_path_buf());
        Ok(())
    }

    fn prepare(&mut self) -> Result<()> {
        let mut state = self.handle.state.lock().unwrap();
        state.prepared = true;
        state.duration_ms = self.duration_ms;
        state.position_ms = 0;
        Ok(())
    }

    fn start(&mut self) {
        let mut state = self.handle.state.lock().unwrap();
        state.playing = true;
        state.start_calls += 1;
    }

    fn pause(&mut self) {
        let mut state = self.handle.state.lock().unwrap();
        state.playing = false;
        state.pause_calls += 1;
    }

    fn reset(&mut self) {
        let mut state = self.handle.state.lock().unwrap();
        state.playing = false;
        state.prepared = false;
        state.position_ms = 0;
        state.reset_calls += 1;
    }

    fn seek(&mut self, position_ms: u64) {
        let mut state = self.handle.state.lock().unwrap();
        state.seek_calls.push(position_ms);
        state.position_ms = position_ms;
    }

    fn position(&self) -> u64 {
        self.handle.state.lock().unwrap().position_ms
    }

    fn duration(&self) -> u64 {
        self.handle.state.lock().unwrap().duration_ms
    }

    fn is_playing(&self) -> bool {
        self.handle.state.lock().unwrap().playing
    }

    fn set_completion_sender(&mut self, tx: CompletionSender) {
        self.handle.state.lock().unwrap().completion_tx = Some(tx);
    }
}

/// Factory producing scripted sources bound to one [`MockHandle`].
pub struct MockFactory {
    handle: MockHandle,
    duration_ms: u64,
    fail_paths: Vec<String>,
}

impl MockFactory {
    pub fn new(duration_ms: u64) -> (Self, MockHandle) {
        let handle = MockHandle::default();
        (
            Self {
                handle: handle.clone(),
                duration_ms,
                fail_paths: Vec::new(),
            },
            handle,
        )
    }

    /// Paths containing `name` fail `set_source` with a Source error.
    pub fn failing_on(mut self, name: &str) -> Self {
        self.fail_paths.push(name.to_string());
        self
    }
}

impl SourceFactory for MockFactory {
    fn create(&self) -> Result<Box<dyn MediaSource>> {
        self.handle.state.lock().unwrap().sources_created += 1;
        Ok(Box::new(MockSource {
            handle: self.handle.clone(),
            duration_ms: self.duration_ms,
            fail_paths: self.fail_paths.clone(),
        }))
    }
}

// ============================================================================
// Recording listener
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Recorded {
    Log(String),
    Duration(u64),
    Position(u64),
    State(PlaybackState),
    Completed,
}

#[derive(Default)]
pub struct RecordingListener {
    events: Mutex<Vec<Recorded>>,
}

impl RecordingListener {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }

    pub fn states(&self) -> Vec<PlaybackState> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::State(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    pub fn positions(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Position(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn logs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Log(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn durations(&self) -> Vec<u64> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Recorded::Duration(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    pub fn completed_count(&self) -> usize {
        self.events()
            .into_iter()
            .filter(|e| matches!(e, Recorded::Completed))
            .count()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl PlaybackInfoListener for RecordingListener {
    fn on_log_updated(&self, message: &str) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Log(message.to_string()));
    }

    fn on_duration_changed(&self, duration_ms: u64) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Duration(duration_ms));
    }

    fn on_position_changed(&self, position_ms: u64) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Position(position_ms));
    }

    fn on_state_changed(&self, state: PlaybackState) {
        self.events.lock().unwrap().push(Recorded::State(state));
    }

    fn on_playback_completed(&self) {
        self.events.lock().unwrap().push(Recorded::Completed);
    }
}

// ============================================================================
// Controller setup
// ============================================================================

/// Controller wired to a scripted source and a recording listener.
pub fn setup_controller(
    duration_ms: u64,
    settings: ControllerSettings,
) -> (PlaybackController, MockHandle, Arc<RecordingListener>) {
    let (factory, handle) = MockFactory::new(duration_ms);
    let listener = RecordingListener::new();
    let controller = PlaybackController::new(Box::new(factory), listener.clone(), settings);
    (controller, handle, listener)
}

/// Same as [`setup_controller`] with a source whose `set_source` rejects
/// paths containing `fail_on`.
pub fn setup_controller_failing_on(
    duration_ms: u64,
    settings: ControllerSettings,
    fail_on: &str,
) -> (PlaybackController, MockHandle, Arc<RecordingListener>) {
    let (factory, handle) = MockFactory::new(duration_ms);
    let factory = factory.failing_on(fail_on);
    let listener = RecordingListener::new();
    let controller = PlaybackController::new(Box::new(factory), listener.clone(), settings);
    (controller, handle, listener)
}
