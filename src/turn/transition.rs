//! Pure turn transition function
//!
//! Given the current state and an event, produces the next state plus the
//! effects to execute. No I/O happens here; the processor owns all of it.

use super::postprocess::finalize_response;
use super::{Effect, Event, TurnState};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// Whitespace-only input is silently dropped by callers; nothing has
    /// been appended to history when this is returned.
    #[error("empty input, nothing to process")]
    EmptyInput,
    #[error("a turn is already in flight for this session")]
    TurnInProgress,
    #[error("invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same state and event, this always produces the same result,
/// with no side effects of its own.
pub fn transition(state: &TurnState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User input handling
        // ============================================================

        // Idle + UserInput -> Dispatched, recording the user message and
        // opening the stream
        (TurnState::Idle, Event::UserInput { text }) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(TransitionError::EmptyInput);
            }
            Ok(
                TransitionResult::new(TurnState::Dispatched {
                    text: trimmed.to_string(),
                })
                .with_effect(Effect::append_user(trimmed))
                .with_effect(Effect::OpenStream),
            )
        }

        // Input while a turn is running is rejected
        (
            TurnState::Dispatched { .. }
            | TurnState::Collecting { .. }
            | TurnState::PostProcessing { .. }
            | TurnState::Done { .. },
            Event::UserInput { .. },
        ) => Err(TransitionError::TurnInProgress),

        // ============================================================
        // Fragment collection
        // ============================================================

        (TurnState::Dispatched { .. }, Event::StreamOpened) => {
            Ok(TransitionResult::new(TurnState::Collecting { lines: vec![] }))
        }

        // Fragments arrive in generation order; each non-empty one becomes
        // a line in the buffer
        (TurnState::Collecting { lines }, Event::FragmentReceived { text }) => {
            let mut lines = lines.clone();
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                lines.push(trimmed.to_string());
            }
            Ok(TransitionResult::new(TurnState::Collecting { lines }))
        }

        (TurnState::Collecting { lines }, Event::StreamEnded) => {
            Ok(TransitionResult::new(TurnState::PostProcessing {
                raw: lines.join("\n"),
            }))
        }

        // ============================================================
        // Response cleanup
        // ============================================================

        (TurnState::PostProcessing { raw }, Event::Finalize) => {
            let response = finalize_response(raw);
            Ok(
                TransitionResult::new(TurnState::Done {
                    response: response.clone(),
                })
                .with_effect(Effect::append_assistant(response)),
            )
        }

        // Everything else is a driver bug
        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "state {state:?} cannot handle {event:?}"
        ))),
    }
}
