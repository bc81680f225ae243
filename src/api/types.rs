//! API request and response types

use crate::history::Message;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

/// Response carrying one finished turn
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// Response with the full session history
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<Message>,
}

/// Response for session reset
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Liveness response with the configured model
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
