//! Conversational turn processing
//!
//! Implements the Elm Architecture pattern: a pure transition function
//! over `(TurnState, Event)` producing effects, and a processor that
//! executes those effects against the session history and model client.

mod effect;
pub mod event;
mod postprocess;
mod processor;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub use postprocess::{finalize_response, FALLBACK_RESPONSE};
pub use processor::{TurnError, TurnProcessor};
pub use state::TurnState;
pub use transition::{transition, TransitionError, TransitionResult};
