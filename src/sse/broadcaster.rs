//! SSE broadcaster for real-time client updates

use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{Stream, StreamExt};
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::events::PlayerEvent;

/// Manages client connections and event distribution
#[derive(Clone)]
pub struct SseBroadcaster {
    tx: broadcast::Sender<PlayerEvent>,
}

impl SseBroadcaster {
    /// Create a new broadcaster buffering up to `capacity` events per client.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Broadcast an event, ignoring if no clients are connected.
    pub fn broadcast_lossy(&self, event: PlayerEvent) {
        let _ = self.tx.send(event);
    }

    /// Get current number of connected clients.
    pub fn client_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Subscribe directly to the raw event channel (in-process consumers).
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.tx.subscribe()
    }

    /// Create an SSE stream for a new client connection.
    pub fn subscribe_stream(&self) -> impl Stream<Item = Result<Event, Infallible>> {
        let rx = self.tx.subscribe();
        let stream = BroadcastStream::new(rx);

        stream.filter_map(|result| async move {
            match result {
                Ok(player_event) => {
                    debug!("broadcasting SSE event: {}", player_event.event_type());
                    let event = Event::default()
                        .id(Uuid::new_v4().to_string())
                        .event(player_event.event_type())
                        .json_data(&player_event)
                        .ok();
                    event.map(Ok)
                }
                Err(e) => {
                    // BroadcastStream wraps RecvError (lagged or closed)
                    warn!("SSE client error: {:?}", e);
                    None
                }
            }
        })
    }

    /// Axum handler body for GET /events.
    pub fn handle_sse_connection(&self) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
        info!(
            "New SSE client connected, total clients: {}",
            self.client_count() + 1
        );

        Sse::new(self.subscribe_stream()).keep_alive(
            KeepAlive::new()
                .interval(Duration::from_secs(30))
                .text("keep-alive"),
        )
    }
}
