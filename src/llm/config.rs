//! Model client configuration

/// Default Ollama endpoint for a stock local install.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";

/// Default model. A 7B instruct model that supports tool calling.
pub const DEFAULT_MODEL: &str = "mistral";

/// Runtime configuration for the model client, read from the environment.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
        }
    }
}

impl LlmConfig {
    /// Read configuration from `OLLAMA_URL`, `HRCHAT_MODEL` and
    /// `HRCHAT_TEMPERATURE`, falling back to the defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| DEFAULT_OLLAMA_URL.to_string()),
            model: std::env::var("HRCHAT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            temperature: std::env::var("HRCHAT_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.0),
        }
    }
}
