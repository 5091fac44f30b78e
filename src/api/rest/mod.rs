//! REST API module for HTTP endpoints
//!
//! - `GET /` - Service status
//! - `GET /api/messages` - Full message history, oldest first

pub mod messages;
pub mod status;

use serde::Serialize;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn storage_read(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "STORAGE_READ_FAILURE".to_string(),
        }
    }
}
