//! Listener-to-broadcast bridge

use crate::events::PlayerEvent;
use crate::listener::PlaybackInfoListener;
use crate::state::PlaybackState;

use super::broadcaster::SseBroadcaster;

/// [`PlaybackInfoListener`] implementation that converts every hook call
/// into a [`PlayerEvent`] on the broadcast channel. This is how the HTTP
/// UI Shell observes the controller.
pub struct BroadcastListener {
    broadcaster: SseBroadcaster,
}

impl BroadcastListener {
    pub fn new(broadcaster: SseBroadcaster) -> Self {
        Self { broadcaster }
    }
}

impl PlaybackInfoListener for BroadcastListener {
    fn on_log_updated(&self, message: &str) {
        self.broadcaster.broadcast_lossy(PlayerEvent::log(message));
    }

    fn on_duration_changed(&self, duration_ms: u64) {
        self.broadcaster
            .broadcast_lossy(PlayerEvent::duration_changed(duration_ms));
    }

    fn on_position_changed(&self, position_ms: u64) {
        self.broadcaster
            .broadcast_lossy(PlayerEvent::position_changed(position_ms));
    }

    fn on_state_changed(&self, state: PlaybackState) {
        self.broadcaster
            .broadcast_lossy(PlayerEvent::state_changed(state));
    }

    fn on_playback_completed(&self) {
        self.broadcaster
            .broadcast_lossy(PlayerEvent::playback_completed());
    }
}
