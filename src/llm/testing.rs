//! Mock implementations for testing
//!
//! Lets the agent loop and turn processor be tested without a live Ollama.

use super::{ChatModel, LlmError, ModelReply, ModelRequest};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock chat model that returns queued replies in order
pub struct MockChatModel {
    replies: Mutex<VecDeque<Result<ModelReply, LlmError>>>,
    model_id: String,
    /// Record of all requests made
    pub requests: Mutex<Vec<ModelRequest>>,
}

impl MockChatModel {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            model_id: "mock-model".to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful reply
    pub fn queue_reply(&self, reply: ModelReply) {
        self.replies.lock().unwrap().push_back(Ok(reply));
    }

    /// Queue an error
    pub fn queue_error(&self, error: LlmError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockChatModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn chat(&self, request: &ModelRequest) -> Result<ModelReply, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::api("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
