//! HTTP API for the chat service

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::history::SessionHistory;
use crate::turn::TurnProcessor;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The single session this server instance hosts. Mutated only by the
    /// turn processor and `/api/reset`, always under the lock.
    pub history: Arc<Mutex<SessionHistory>>,
    pub processor: Arc<TurnProcessor>,
}

impl AppState {
    pub fn new(processor: TurnProcessor) -> Self {
        Self {
            history: Arc::new(Mutex::new(SessionHistory::new())),
            processor: Arc::new(processor),
        }
    }
}
