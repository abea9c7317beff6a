//! Verdant Server
//!
//! HTTP front end for the eco-commerce assistant: chat, product
//! recommendations, a static index page and a health check.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState, IndexPage};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use verdant_assistant::{Assistant, AssistantError};
use verdant_llm::{GeminiProvider, LlmError};

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Text-generation client could not be built
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Assistant could not be built
    #[error("Assistant error: {0}")]
    Assistant(#[from] AssistantError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Build the shared state: Gemini client, assistant and index page source
pub fn build_state(config: &ServerConfig) -> Result<AppState<GeminiProvider>, ServerError> {
    let provider = GeminiProvider::with_endpoint(
        &config.llm.endpoint,
        &config.llm.api_key,
        &config.llm.model,
        config.llm.timeout_secs,
    )?
    .with_max_retries(config.llm.max_retries);

    let assistant = Assistant::new(provider, config.assistant.clone())?;

    let index_page = match &config.index_path {
        Some(path) => IndexPage::File(path.clone()),
        None => IndexPage::Embedded,
    };

    Ok(AppState {
        assistant: Arc::new(assistant),
        index_page,
    })
}

/// Start the HTTP server
///
/// Builds the assistant from configuration and serves until Ctrl-C.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Verdant server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} at {}", config.llm.model, config.llm.endpoint);
    info!("Marker matching: {:?}", config.assistant.marker_matching);

    let state = build_state(&config)?;
    let app = create_router(state);

    // Bind and serve
    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
