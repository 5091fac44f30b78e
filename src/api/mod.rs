//! API module for HTTP and WebSocket endpoints
//!
//! This module provides the REST API and the real-time WebSocket channel.

pub mod http;
pub mod rest;
pub mod websocket;

pub use http::create_router;
pub use websocket::AppState;
