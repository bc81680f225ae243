//! Events that drive a turn forward

/// Events that trigger turn state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// Raw user utterance, untrimmed
    UserInput { text: String },

    /// The fragment stream for this turn was opened
    StreamOpened,

    /// One fragment of assistant text arrived
    FragmentReceived { text: String },

    /// The fragment stream is exhausted
    StreamEnded,

    /// Run response cleanup over the collected buffer
    Finalize,
}
