//! HTTP request handlers
//!
//! Command handlers reply with the post-command session snapshot so the UI
//! can resync its controls without a second round trip. Failures inside the
//! controller surface as `log` events on the SSE stream, never as HTTP
//! errors, matching the controller's swallow-and-log boundary.

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    Json,
};
use futures::stream::Stream;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::PathBuf;
use tracing::info;

use crate::api::AppState;
use crate::state::PlaybackState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body for load/reset; `{}` falls back to the configured media file.
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct SeekRequest {
    pub position_ms: u64,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FlagRequest {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct FlagResponse {
    pub enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct StateResponse {
    pub state: PlaybackState,
    pub display: String,
    pub playing: bool,
}

#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub position_ms: u64,
    pub duration_ms: u64,
    pub playing: bool,
}

async fn state_snapshot(state: &AppState) -> StateResponse {
    let current = state.controller.state().await;
    StateResponse {
        state: current,
        display: current.display_name().to_string(),
        playing: state.controller.is_playing().await,
    }
}

// ============================================================================
// Playback Commands
// ============================================================================

/// POST /playback/load - bind and prepare a media file
pub async fn load(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Json<StateResponse> {
    let path = req.path.unwrap_or_else(|| state.media_file.clone());
    info!("load request: {}", path.display());
    state.controller.load(path).await;
    Json(state_snapshot(&state).await)
}

/// POST /playback/play
pub async fn play(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.play().await;
    Json(state_snapshot(&state).await)
}

/// POST /playback/pause
pub async fn pause(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.pause().await;
    Json(state_snapshot(&state).await)
}

/// POST /playback/toggle - single transport-button behavior
pub async fn toggle(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.toggle().await;
    Json(state_snapshot(&state).await)
}

/// POST /playback/seek
pub async fn seek(
    State(state): State<AppState>,
    Json(req): Json<SeekRequest>,
) -> Json<PositionResponse> {
    state.controller.seek(req.position_ms).await;
    Json(PositionResponse {
        position_ms: state.controller.position().await,
        duration_ms: state.controller.duration().await,
        playing: state.controller.is_playing().await,
    })
}

/// POST /playback/reset - reset the source and reload
pub async fn reset(
    State(state): State<AppState>,
    Json(req): Json<PathRequest>,
) -> Json<StateResponse> {
    let path = req.path.unwrap_or_else(|| state.media_file.clone());
    info!("reset request: {}", path.display());
    state.controller.reset(path).await;
    Json(state_snapshot(&state).await)
}

/// POST /playback/release - drop the media source
pub async fn release(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.release().await;
    Json(state_snapshot(&state).await)
}

// ============================================================================
// Playback Queries
// ============================================================================

/// GET /playback/state
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    Json(state_snapshot(&state).await)
}

/// GET /playback/position
pub async fn get_position(State(state): State<AppState>) -> Json<PositionResponse> {
    Json(PositionResponse {
        position_ms: state.controller.position().await,
        duration_ms: state.controller.duration().await,
        playing: state.controller.is_playing().await,
    })
}

// ============================================================================
// Session Flags
// ============================================================================

/// GET /playback/loop
pub async fn get_loop(State(state): State<AppState>) -> Json<FlagResponse> {
    Json(FlagResponse {
        enabled: state.controller.is_looping(),
    })
}

/// POST /playback/loop
pub async fn set_loop(
    State(state): State<AppState>,
    Json(req): Json<FlagRequest>,
) -> Json<FlagResponse> {
    state.controller.set_looping(req.enabled).await;
    Json(FlagResponse {
        enabled: state.controller.is_looping(),
    })
}

/// GET /playback/background
pub async fn get_background(State(state): State<AppState>) -> Json<FlagResponse> {
    Json(FlagResponse {
        enabled: state.controller.background_audio(),
    })
}

/// POST /playback/background
pub async fn set_background(
    State(state): State<AppState>,
    Json(req): Json<FlagRequest>,
) -> Json<FlagResponse> {
    state.controller.set_background_audio(req.enabled).await;
    Json(FlagResponse {
        enabled: state.controller.background_audio(),
    })
}

// ============================================================================
// Lifecycle Hooks
// ============================================================================

/// POST /lifecycle/resume
pub async fn resume(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.resume().await;
    Json(state_snapshot(&state).await)
}

/// POST /lifecycle/suspend
pub async fn suspend(State(state): State<AppState>) -> Json<StateResponse> {
    state.controller.suspend().await;
    Json(state_snapshot(&state).await)
}

// ============================================================================
// SSE
// ============================================================================

/// GET /events - SSE event stream
pub async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    state.broadcaster.handle_sse_connection()
}
