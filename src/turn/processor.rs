//! Turn processor
//!
//! Drives the pure transition function: executes effects, pumps the
//! fragment stream, and feeds resulting events back in until the turn is
//! done or fails.

use super::transition::{transition, TransitionError};
use super::{Effect, Event, TurnState};
use crate::history::SessionHistory;
use crate::llm::{ChatAgent, FragmentStream, LlmError};
use futures::StreamExt;
use thiserror::Error;

/// Errors surfaced to the presentation layer for a failed turn
#[derive(Debug, Error)]
pub enum TurnError {
    /// Whitespace-only input. Nothing was appended to history.
    #[error("empty input, nothing to process")]
    EmptyInput,

    /// Generation failed after the user message was appended. History
    /// keeps the user message; no assistant message is recorded.
    #[error("{0}")]
    Generation(#[from] LlmError),

    /// Driver and machine disagree. Indicates a bug, not an operational
    /// failure.
    #[error("turn state error: {0}")]
    State(TransitionError),
}

impl From<TransitionError> for TurnError {
    fn from(err: TransitionError) -> Self {
        match err {
            TransitionError::EmptyInput => TurnError::EmptyInput,
            other => TurnError::State(other),
        }
    }
}

/// Runs whole turns against one session history.
///
/// One processor serves any number of sequential turns; each `process`
/// call creates a fresh state machine and discards it at the end.
pub struct TurnProcessor {
    agent: ChatAgent,
}

impl TurnProcessor {
    pub fn new(agent: ChatAgent) -> Self {
        Self { agent }
    }

    pub fn model_id(&self) -> String {
        self.agent.model_id()
    }

    /// Run one full turn: append the user message, stream the model
    /// output, post-process, append the assistant response.
    ///
    /// On success history gains exactly two messages. On generation
    /// failure it keeps only the user message; on empty input it is left
    /// untouched.
    pub async fn process(
        &self,
        history: &mut SessionHistory,
        input: &str,
    ) -> Result<String, TurnError> {
        let mut state = TurnState::Idle;
        let mut stream: Option<FragmentStream> = None;

        // Process events in a loop to handle chained effects
        let mut events_to_process = vec![Event::UserInput {
            text: input.to_string(),
        }];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(&state, current_event)?;
            state = result.new_state;
            tracing::debug!(state = state.name(), "Turn advanced");

            for effect in result.effects {
                if let Some(generated) = self.execute_effect(effect, history, &mut stream) {
                    events_to_process.push(generated);
                }
            }

            match &state {
                // Collecting consumes the stream one fragment at a time
                TurnState::Collecting { .. } => match stream.as_mut() {
                    Some(s) => match s.next().await {
                        Some(Ok(fragment)) => events_to_process.push(Event::FragmentReceived {
                            text: fragment.text,
                        }),
                        Some(Err(e)) => return Err(TurnError::Generation(e)),
                        None => events_to_process.push(Event::StreamEnded),
                    },
                    None => {
                        return Err(TurnError::Generation(LlmError::protocol(
                            "collecting with no open stream",
                        )))
                    }
                },
                // PostProcessing is an intermediate state, finalized
                // immediately
                TurnState::PostProcessing { .. } => events_to_process.push(Event::Finalize),
                TurnState::Done { response } => {
                    tracing::info!(chars = response.len(), "Turn completed");
                    return Ok(response.clone());
                }
                TurnState::Idle | TurnState::Dispatched { .. } => {}
            }
        }

        Err(TurnError::Generation(LlmError::protocol(
            "turn ended before a response was produced",
        )))
    }

    fn execute_effect(
        &self,
        effect: Effect,
        history: &mut SessionHistory,
        stream: &mut Option<FragmentStream>,
    ) -> Option<Event> {
        match effect {
            Effect::AppendUserMessage { content } => {
                history.push_user(content);
                None
            }
            Effect::OpenStream => {
                *stream = Some(self.agent.run(history.messages()));
                Some(Event::StreamOpened)
            }
            Effect::AppendAssistantMessage { content } => {
                history.push_assistant(content);
                None
            }
        }
    }
}
