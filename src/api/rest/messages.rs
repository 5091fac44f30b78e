//! Message history endpoint

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use super::ApiError;
use crate::api::websocket::state::AppState;

/// GET /api/messages - All persisted messages ordered by timestamp
///
/// When persistence is disabled this returns a one-element array holding
/// the fallback sentinel. A read failure on a live store is a 500.
pub async fn list_messages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.backend.list_all().await {
        Ok(messages) => (StatusCode::OK, Json(messages)).into_response(),
        Err(e) => {
            log::error!("Failed to read message history: {}", e);
            let error = ApiError::storage_read(e.to_string());
            (StatusCode::INTERNAL_SERVER_ERROR, Json(error)).into_response()
        }
    }
}
