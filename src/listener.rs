//! Playback info listener contract
//!
//! A passive sink the controller reports into. Every hook has a default
//! no-op body so consumers override only what they need. Hooks may be
//! invoked from the position ticker task; implementations marshal to their
//! own context before touching anything thread-bound.

use crate::state::PlaybackState;

/// Receives playback duration, position, state, and log updates from the
/// controller.
pub trait PlaybackInfoListener: Send + Sync {
    /// A debug log line for the UI's scrolling log view.
    fn on_log_updated(&self, _message: &str) {}

    /// Duration of the freshly loaded source, in milliseconds.
    fn on_duration_changed(&self, _duration_ms: u64) {}

    /// Current playback position, in milliseconds.
    fn on_position_changed(&self, _position_ms: u64) {}

    /// The session transitioned to a new state.
    fn on_state_changed(&self, _state: PlaybackState) {}

    /// The current play-through reached its natural end.
    fn on_playback_completed(&self) {}
}

/// Listener that ignores everything. Useful as a construction default before
/// a real consumer is attached.
pub struct NoopListener;

impl PlaybackInfoListener for NoopListener {}
