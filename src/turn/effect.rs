//! Effects produced by turn transitions

/// Side effects to be executed after a state transition. The transition
/// function stays pure; the processor owns all history and model I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append the accepted user message to the session history
    AppendUserMessage { content: String },

    /// Start the model run over the current history
    OpenStream,

    /// Append the final assistant response to the session history
    AppendAssistantMessage { content: String },
}

impl Effect {
    pub fn append_user(content: impl Into<String>) -> Self {
        Effect::AppendUserMessage {
            content: content.into(),
        }
    }

    pub fn append_assistant(content: impl Into<String>) -> Self {
        Effect::AppendAssistantMessage {
            content: content.into(),
        }
    }
}
