//! Server-Sent Events relay
//!
//! Bridges listener hooks onto a broadcast channel and streams the resulting
//! [`PlayerEvent`](crate::events::PlayerEvent)s to connected UI clients.

pub mod bridge;
pub mod broadcaster;

pub use bridge::BroadcastListener;
pub use broadcaster::SseBroadcaster;
