//! REST API implementation for the playback service
//!
//! Maps HTTP endpoints onto controller commands and queries. The UI Shell
//! issues commands here and observes state through `/api/v1/events`.

pub mod handlers;

use axum::{
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::path::PathBuf;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::playback::PlaybackController;
use crate::sse::SseBroadcaster;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Playback coordinator
    pub controller: PlaybackController,
    /// Event channel backing `/events`
    pub broadcaster: SseBroadcaster,
    /// Media file used when a command omits an explicit path
    pub media_file: PathBuf,
    /// Server port
    pub port: u16,
}

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check (no prefix for health endpoint)
        .route("/health", get(health_check))
        // API v1 routes
        .nest(
            "/api/v1",
            Router::new()
                // Playback command endpoints
                .route("/playback/load", post(handlers::load))
                .route("/playback/play", post(handlers::play))
                .route("/playback/pause", post(handlers::pause))
                .route("/playback/toggle", post(handlers::toggle))
                .route("/playback/seek", post(handlers::seek))
                .route("/playback/reset", post(handlers::reset))
                .route("/playback/release", post(handlers::release))
                // Playback query endpoints
                .route("/playback/state", get(handlers::get_state))
                .route("/playback/position", get(handlers::get_position))
                // Session flags
                .route(
                    "/playback/loop",
                    get(handlers::get_loop).post(handlers::set_loop),
                )
                .route(
                    "/playback/background",
                    get(handlers::get_background).post(handlers::set_background),
                )
                // Lifecycle hooks the UI Shell calls on its own triggers
                .route("/lifecycle/resume", post(handlers::resume))
                .route("/lifecycle/suspend", post(handlers::suspend))
                // SSE events
                .route("/events", get(handlers::sse_handler)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "module": "reprise",
        "version": env!("CARGO_PKG_VERSION"),
        "port": state.port,
        "media_file": state.media_file.display().to_string(),
    }))
}
