//! Common types shared across the model client

use serde_json::Value;

/// One chat completion request.
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Conversation transcript, oldest first.
    pub messages: Vec<TranscriptMessage>,
    /// Tool definitions offered for this call. Empty disables tool use.
    pub tools: Vec<ToolDefinition>,
    /// Sampling temperature. The product runs at 0 for reproducible turns.
    pub temperature: f32,
}

/// A transcript entry as the model sees it. Richer than the session
/// history: it carries tool calls and tool results produced mid-turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptMessage {
    User {
        content: String,
    },
    Assistant {
        content: String,
        tool_calls: Vec<ToolCallRequest>,
    },
    /// Result of a tool invocation, fed back for the next step.
    Tool {
        name: String,
        content: String,
    },
}

impl TranscriptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self::User {
            content: content.into(),
        }
    }

    /// Plain assistant text with no tool calls.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn tool(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Tool {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCallRequest {
    pub name: String,
    /// Arguments as a JSON object, passed to the registry unparsed.
    pub arguments: Value,
}

/// Tool definition advertised to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the arguments object.
    pub parameters: Value,
}

/// One assistant reply from a single completion call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelReply {
    pub content: String,
    pub tool_calls: Vec<ToolCallRequest>,
}

impl ModelReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    /// Reply consisting of a single tool call with no text.
    pub fn tool_call(name: impl Into<String>, arguments: Value) -> Self {
        Self {
            content: String::new(),
            tool_calls: vec![ToolCallRequest {
                name: name.into(),
                arguments,
            }],
        }
    }

    pub fn has_tool_calls(&self) -> bool {
        !self.tool_calls.is_empty()
    }
}

/// One unit of finalized assistant text from an agent run.
///
/// Fragments arrive in generation order and are never revised. A run that
/// needs several model steps yields one fragment per step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
}

impl Fragment {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
