//! Service status endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::api::websocket::state::AppState;

/// Response for GET /
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    /// Currently connected WebSocket clients
    pub connections: usize,
    /// Whether messages are being persisted
    pub persistence: bool,
}

/// GET / - Report that the backend is running
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Chat backend running",
        connections: state.registry.len(),
        persistence: state.backend.is_available(),
    })
}
