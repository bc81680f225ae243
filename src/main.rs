//! HR assistant chat server
//!
//! Serves the embedded chat page and drives conversational turns against
//! a locally hosted Ollama model.

use hrchat::api::{create_router, AppState};
use hrchat::llm::{ChatAgent, LlmConfig, LoggingModel, OllamaService};
use hrchat::tools::ToolRegistry;
use hrchat::turn::TurnProcessor;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "hrchat=info,tower_http=debug".into()),
    );
    if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_span_list(false),
            )
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // Configuration
    let config = LlmConfig::from_env();
    let addr: SocketAddr = std::env::var("HRCHAT_HTTP_ADDR")
        .ok()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 3000)));

    tracing::info!(
        model = %config.model,
        endpoint = %config.base_url,
        temperature = config.temperature,
        "Model client configured"
    );

    // Wire the turn processor
    let model = Arc::new(LoggingModel::new(Arc::new(OllamaService::new(&config))));
    let agent = ChatAgent::new(model, Arc::new(ToolRegistry::standard()), config.temperature);
    let state = AppState::new(TurnProcessor::new(agent));

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(compression);

    let app = create_router(state).layer(middleware);

    // Start server
    tracing::info!("HR assistant listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
