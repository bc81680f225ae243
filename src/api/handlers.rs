//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatRequest, ChatResponse, ErrorResponse, HealthResponse, HistoryResponse, SuccessResponse,
};
use super::AppState;
use crate::llm::LlmError;
use crate::turn::TurnError;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the chat page
        .route("/", get(serve_page))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // Session history
        .route("/api/history", get(get_history))
        // One conversational turn
        .route("/api/chat", post(send_chat))
        // Start a fresh session
        .route("/api/reset", post(reset_session))
        // Liveness
        .route("/api/health", get(health))
        .with_state(state)
}

// ============================================================
// Page Handler
// ============================================================

/// Serve the chat page
async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Chat
// ============================================================

/// Run one conversational turn.
///
/// The session lock is held across the whole turn, so concurrent requests
/// queue up and turns stay strictly serialized.
async fn send_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let mut history = state.history.lock().await;
    let response = state.processor.process(&mut history, &req.message).await?;
    Ok(Json(ChatResponse { response }))
}

async fn get_history(State(state): State<AppState>) -> Json<HistoryResponse> {
    let history = state.history.lock().await;
    Json(HistoryResponse {
        messages: history.messages().to_vec(),
    })
}

async fn reset_session(State(state): State<AppState>) -> Json<SuccessResponse> {
    state.history.lock().await.clear();
    tracing::info!("Session history cleared");
    Json(SuccessResponse { success: true })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.processor.model_id(),
    })
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Upstream(String),
    Internal(String),
}

impl From<TurnError> for AppError {
    fn from(err: TurnError) -> Self {
        match err {
            TurnError::EmptyInput => AppError::BadRequest(err.to_string()),
            TurnError::Generation(e) => AppError::Upstream(describe_generation_error(&e)),
            TurnError::State(e) => AppError::Internal(e.to_string()),
        }
    }
}

/// Attach the operator hint, when there is one, to the model error.
fn describe_generation_error(e: &LlmError) -> String {
    match e.kind.hint() {
        Some(hint) => format!("{e} ({hint})"),
        None => e.to_string(),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Upstream(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
