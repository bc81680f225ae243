//! HR assistant chat core
//!
//! Conversation state, the Ollama-backed agent loop, the calculator tool,
//! and the HTTP API shared by the server and REPL binaries.

// Shared core for the two binaries, not a published library.
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]

pub mod api;
pub mod history;
pub mod llm;
pub mod tools;
pub mod turn;
