//! Ollama chat backend
//!
//! Talks to a locally hosted Ollama instance over its `/api/chat` endpoint.
//! Responses are requested non-streaming; the agent loop above this layer
//! turns whole replies into fragments.

use super::types::{ModelReply, ModelRequest, ToolCallRequest, TranscriptMessage};
use super::{ChatModel, LlmConfig, LlmError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Ollama service implementation
pub struct OllamaService {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaService {
    pub fn new(config: &LlmConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }
    }

    fn chat_url(&self) -> String {
        format!("{}/api/chat", self.base_url)
    }

    fn translate_request(&self, request: &ModelRequest) -> OllamaChatRequest {
        let messages: Vec<OllamaChatMessage> = request
            .messages
            .iter()
            .map(Self::translate_message)
            .collect();

        let tools: Vec<OllamaTool> = request
            .tools
            .iter()
            .map(|t| OllamaTool {
                r#type: "function".to_string(),
                function: OllamaFunctionDef {
                    name: t.name.clone(),
                    description: t.description.clone(),
                    parameters: t.parameters.clone(),
                },
            })
            .collect();

        OllamaChatRequest {
            model: self.model.clone(),
            messages,
            tools,
            stream: false,
            options: OllamaOptions {
                temperature: request.temperature,
            },
        }
    }

    fn translate_message(msg: &TranscriptMessage) -> OllamaChatMessage {
        match msg {
            TranscriptMessage::User { content } => OllamaChatMessage {
                role: "user".to_string(),
                content: content.clone(),
                tool_calls: Vec::new(),
                tool_name: None,
            },
            TranscriptMessage::Assistant {
                content,
                tool_calls,
            } => OllamaChatMessage {
                role: "assistant".to_string(),
                content: content.clone(),
                tool_calls: tool_calls
                    .iter()
                    .map(|call| OllamaToolCall {
                        function: OllamaFunctionCall {
                            name: call.name.clone(),
                            arguments: call.arguments.clone(),
                        },
                    })
                    .collect(),
                tool_name: None,
            },
            TranscriptMessage::Tool { name, content } => OllamaChatMessage {
                role: "tool".to_string(),
                content: content.clone(),
                tool_calls: Vec::new(),
                tool_name: Some(name.clone()),
            },
        }
    }

    fn normalize_response(resp: OllamaChatResponse) -> ModelReply {
        let tool_calls: Vec<ToolCallRequest> = resp
            .message
            .tool_calls
            .into_iter()
            .map(|call| ToolCallRequest {
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        ModelReply {
            content: resp.message.content,
            tool_calls,
        }
    }

    fn classify_error(&self, status: reqwest::StatusCode, body: &str) -> LlmError {
        // Ollama wraps failures in {"error": "..."}
        let message = serde_json::from_str::<OllamaErrorResponse>(body)
            .map(|e| e.error)
            .unwrap_or_else(|_| body.to_string());

        match status.as_u16() {
            404 if message.contains("not found") => LlmError::model_unavailable(format!(
                "Model '{}' is not installed at {}: {message}",
                self.model, self.base_url
            )),
            400 => LlmError::api(format!("Invalid request: {message}")),
            500..=599 => LlmError::api(format!("Ollama server error: {message}")),
            _ => LlmError::api(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl ChatModel for OllamaService {
    async fn chat(&self, request: &ModelRequest) -> Result<ModelReply, LlmError> {
        let ollama_request = self.translate_request(request);

        let response = self
            .client
            .post(self.chat_url())
            .json(&ollama_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::endpoint_unreachable(format!(
                        "Cannot reach Ollama at {}: {e}",
                        self.base_url
                    ))
                } else if e.is_timeout() {
                    LlmError::endpoint_unreachable(format!("Request to Ollama timed out: {e}"))
                } else {
                    LlmError::api(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::protocol(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(self.classify_error(status, &body));
        }

        let ollama_response: OllamaChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::protocol(format!("Failed to parse response: {e} - body: {body}")))?;

        Ok(Self::normalize_response(ollama_response))
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<OllamaChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<OllamaTool>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaChatMessage {
    role: String,
    #[serde(default)]
    content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<OllamaToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct OllamaTool {
    r#type: String,
    function: OllamaFunctionDef,
}

#[derive(Debug, Serialize)]
struct OllamaFunctionDef {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaToolCall {
    function: OllamaFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaFunctionCall {
    name: String,
    arguments: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}
