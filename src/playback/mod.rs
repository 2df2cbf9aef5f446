//! Playback coordination
//!
//! [`controller`] holds the playback-state coordinator; [`ticker`] the
//! repeating position-poll task it owns while playing.

pub mod controller;
pub mod ticker;

pub use controller::{ControllerSettings, PlaybackController};
pub use ticker::PositionTicker;
