//! # reprise
//!
//! Single-track audio playback service.
//!
//! **Purpose:** Coordinate the lifecycle of one media play-through —
//! load/play/pause/seek/reset/release, loop and background-audio flags,
//! fixed-cadence position reporting — and expose it to a UI Shell over an
//! HTTP command surface with an SSE event stream.
//!
//! **Architecture:** A [`playback::PlaybackController`] owns an opaque
//! [`source::MediaSource`] (the platform decode/output stack) and reports
//! into an injected [`listener::PlaybackInfoListener`]; the HTTP layer
//! bridges those hooks onto a broadcast channel for SSE delivery.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod listener;
pub mod playback;
pub mod source;
pub mod sse;
pub mod state;

pub use error::{Error, Result};
pub use listener::{NoopListener, PlaybackInfoListener};
pub use playback::{ControllerSettings, PlaybackController};
pub use state::PlaybackState;
