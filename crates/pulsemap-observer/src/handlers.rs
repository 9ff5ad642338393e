//! REST handlers for the Observer API.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use pulsemap_types::LogEntry;
use serde::Serialize;

use crate::state::AppState;

/// Response body for `GET /`.
#[derive(Debug, Clone, Serialize)]
pub struct InfoResponse {
    /// Human-readable liveness message.
    pub message: String,
}

/// Response body for `GET /api/logs`.
#[derive(Debug, Clone, Serialize)]
pub struct LogsResponse {
    /// Recent log entries, newest first, capped by the feed.
    pub logs: Vec<LogEntry>,
}

/// Response body for `GET /api/status`.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Events currently animating.
    pub active_events: usize,
    /// Log entries currently retained.
    pub log_entries: usize,
    /// Milliseconds between render frames.
    pub frame_interval_ms: u64,
    /// Whole seconds since the session started.
    pub uptime_seconds: u64,
    /// Whether a shutdown is in progress.
    pub stopping: bool,
}

/// `GET /` -- liveness check.
pub async fn index() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: String::from("Pulsemap engine running"),
    })
}

/// `GET /api/logs` -- the scrolling log feed, newest first.
pub async fn get_logs(State(state): State<Arc<AppState>>) -> Json<LogsResponse> {
    let feed = state.logs.read().await;
    Json(LogsResponse {
        logs: feed.recent().cloned().collect(),
    })
}

/// `GET /api/status` -- engine status snapshot.
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let active_events = state.store.read().await.len();
    let log_entries = state.logs.read().await.len();
    Json(StatusResponse {
        active_events,
        log_entries,
        frame_interval_ms: state.control.frame_interval_ms(),
        uptime_seconds: state.control.uptime_seconds(),
        stopping: state.control.is_stop_requested(),
    })
}
