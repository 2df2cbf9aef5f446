//! Wire event types for real-time playback updates
//!
//! Every listener hook has a serialized counterpart here so the UI Shell can
//! consume the same information over the SSE channel that an in-process
//! listener receives through trait calls.

use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::state::PlaybackState;

/// Playback event variants sent to UI clients
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerEvent {
    /// Playback state transition
    StateChanged {
        state: PlaybackState,
        display: String,
        timestamp: u64,
    },

    /// Position update (ticker cadence while playing, plus resets)
    PositionChanged {
        position_ms: u64,
        timestamp: u64,
    },

    /// Duration of the freshly loaded source
    DurationChanged {
        duration_ms: u64,
        timestamp: u64,
    },

    /// Debug log line for the UI's scrolling log view
    Log {
        message: String,
        timestamp: u64,
    },

    /// Play-through reached natural end
    PlaybackCompleted {
        timestamp: u64,
    },
}

impl PlayerEvent {
    /// Current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    /// Create a StateChanged event
    pub fn state_changed(state: PlaybackState) -> Self {
        Self::StateChanged {
            state,
            display: state.display_name().to_string(),
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create a PositionChanged event
    pub fn position_changed(position_ms: u64) -> Self {
        Self::PositionChanged {
            position_ms,
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create a DurationChanged event
    pub fn duration_changed(duration_ms: u64) -> Self {
        Self::DurationChanged {
            duration_ms,
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create a Log event
    pub fn log(message: impl Into<String>) -> Self {
        Self::Log {
            message: message.into(),
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Create a PlaybackCompleted event
    pub fn playback_completed() -> Self {
        Self::PlaybackCompleted {
            timestamp: Self::current_timestamp_ms(),
        }
    }

    /// Event type as string for the SSE event field
    pub fn event_type(&self) -> &'static str {
        match self {
            PlayerEvent::StateChanged { .. } => "state_changed",
            PlayerEvent::PositionChanged { .. } => "position_changed",
            PlayerEvent::DurationChanged { .. } => "duration_changed",
            PlayerEvent::Log { .. } => "log",
            PlayerEvent::PlaybackCompleted { .. } => "playback_completed",
        }
    }
}
