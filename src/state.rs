//! Playback lifecycle state

use serde::{Deserialize, Serialize};

/// Lifecycle state of the current playback session.
///
/// Exactly one state is active at any time. Transitions happen only through
/// [`PlaybackController`](crate::playback::PlaybackController) commands or a
/// source completion notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// No session established yet
    Invalid,
    /// Source started and the position ticker is running
    Playing,
    /// Source paused; displayed position retained
    Paused,
    /// Source was reset and reloaded
    Reset,
    /// Play-through reached natural end
    Completed,
}

impl PlaybackState {
    /// Display name shown in UI log lines and state responses.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlaybackState::Invalid => "INVALID",
            PlaybackState::Playing => "PLAYING",
            PlaybackState::Paused => "PAUSED",
            PlaybackState::Reset => "RESET",
            PlaybackState::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
