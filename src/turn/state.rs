//! Turn lifecycle states

/// State of one conversational turn.
///
/// A turn is born `Idle`, moves forward only, and is discarded once it
/// reaches `Done` or its driver aborts on a stream failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    /// Waiting for user input
    #[default]
    Idle,

    /// Input accepted; the user message is being recorded and the model
    /// run started
    Dispatched {
        /// The accepted (trimmed) utterance
        text: String,
    },

    /// Consuming the fragment stream
    Collecting {
        /// Non-empty fragment texts collected so far, one line each
        lines: Vec<String>,
    },

    /// Stream exhausted; the raw buffer awaits cleanup
    PostProcessing {
        /// Collected lines joined with newlines
        raw: String,
    },

    /// Final response produced and recorded
    Done { response: String },
}

impl TurnState {
    pub fn name(&self) -> &'static str {
        match self {
            TurnState::Idle => "idle",
            TurnState::Dispatched { .. } => "dispatched",
            TurnState::Collecting { .. } => "collecting",
            TurnState::PostProcessing { .. } => "post_processing",
            TurnState::Done { .. } => "done",
        }
    }
}
