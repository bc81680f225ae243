//! Model client error types

use thiserror::Error;

/// Model client error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct LlmError {
    pub kind: LlmErrorKind,
    pub message: String,
}

impl LlmError {
    pub fn new(kind: LlmErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn endpoint_unreachable(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::EndpointUnreachable, message)
    }

    pub fn model_unavailable(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::ModelUnavailable, message)
    }

    pub fn api(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Api, message)
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::Protocol, message)
    }

    pub fn step_limit(message: impl Into<String>) -> Self {
        Self::new(LlmErrorKind::StepLimit, message)
    }
}

/// Error classification. Turns are never retried; the kind drives the
/// operator-facing message and the HTTP status of a failed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmErrorKind {
    /// Endpoint did not answer (connection refused, timeout)
    EndpointUnreachable,
    /// Endpoint is up but the configured model is not installed (404)
    ModelUnavailable,
    /// Any other HTTP-level failure from the endpoint
    Api,
    /// Response arrived but could not be understood
    Protocol,
    /// Agent loop hit the step cap without a final answer
    StepLimit,
}

impl LlmErrorKind {
    /// Human-readable hint shown alongside the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::EndpointUnreachable => Some("is Ollama running?"),
            Self::ModelUnavailable => Some("pull the model with `ollama pull`"),
            Self::Api | Self::Protocol | Self::StepLimit => None,
        }
    }
}
