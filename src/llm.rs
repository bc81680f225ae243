//! Language model client
//!
//! A thin seam over the local Ollama chat endpoint, plus the agent loop
//! that lets the model call tools and streams its output back as fragments.

mod agent;
mod config;
mod error;
mod ollama;
mod types;

#[cfg(test)]
pub mod testing;

pub use agent::{ChatAgent, FragmentStream, MAX_AGENT_STEPS};
pub use config::{LlmConfig, DEFAULT_MODEL, DEFAULT_OLLAMA_URL};
pub use error::{LlmError, LlmErrorKind};
pub use ollama::OllamaService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for chat completion backends
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Make one non-streaming chat completion call
    async fn chat(&self, request: &ModelRequest) -> Result<ModelReply, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for chat models
pub struct LoggingModel {
    inner: Arc<dyn ChatModel>,
    model_id: String,
}

impl LoggingModel {
    pub fn new(inner: Arc<dyn ChatModel>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl ChatModel for LoggingModel {
    async fn chat(&self, request: &ModelRequest) -> Result<ModelReply, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.chat(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(reply) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    transcript_len = request.messages.len(),
                    tool_calls = reply.tool_calls.len(),
                    "Chat completion finished"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Chat completion failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
