//! HTTP server setup with Axum

use std::sync::Arc;
use axum::{
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{messages, status};
use super::websocket::{handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status::get_status))
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        .route("/api/messages", get(messages::list_messages))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
