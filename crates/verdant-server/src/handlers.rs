//! HTTP request handlers for the server.
//!
//! Implements the chat, recommendation, index and health endpoints using
//! axum. Text-generation failures never reach the client as errors: chat
//! answers with a fixed apology and recommend answers with an empty list.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use verdant_assistant::{Assistant, AssistantError, CHAT_FALLBACK_MESSAGE};
use verdant_domain::{RecommendationList, TextGenerator, UserPreferences};

/// Page compiled into the binary
pub const EMBEDDED_INDEX: &str = include_str!("../static/index.html");

/// Where `GET /` gets its page from
#[derive(Debug, Clone)]
pub enum IndexPage {
    /// The page compiled into the binary
    Embedded,
    /// A page read from disk on every request
    File(PathBuf),
}

/// Shared application state
pub struct AppState<G>
where
    G: TextGenerator,
{
    /// The assistant serving chat and recommendation requests
    pub assistant: Arc<Assistant<G>>,
    /// Source of the index page
    pub index_page: IndexPage,
}

impl<G> Clone for AppState<G>
where
    G: TextGenerator,
{
    fn clone(&self) -> Self {
        Self {
            assistant: Arc::clone(&self.assistant),
            index_page: self.index_page.clone(),
        }
    }
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User message; missing is treated as empty
    #[serde(default)]
    pub message: String,
}

/// Chat response
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model reply, or the fallback sentence
    pub response: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Always "ok" while the process is serving
    pub status: String,
    /// Model behind the assistant
    pub model: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Request body is well-formed JSON but unacceptable
    BadRequest(String),
    /// Request body could not be read as JSON
    Rejection(StatusCode, String),
    /// Internal server error
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Rejection(status, msg) => (status, msg),
            AppError::InternalError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejection(rejection.status(), rejection.body_text())
    }
}

impl From<AssistantError> for AppError {
    fn from(e: AssistantError) -> Self {
        match e {
            AssistantError::InvalidRequest(msg) => AppError::BadRequest(msg),
            other => AppError::InternalError(other.to_string()),
        }
    }
}

/// POST /recommend - Recommend products for a preferences object
async fn recommend<G>(
    State(state): State<AppState<G>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationList>, AppError>
where
    G: TextGenerator + 'static,
{
    let Json(value) = payload?;
    let preferences = UserPreferences::from_value(value).map_err(AppError::BadRequest)?;

    match state.assistant.recommend(&preferences).await {
        Ok(products) => Ok(Json(products)),
        Err(e) if e.is_service_failure() => {
            warn!("Error generating recommendations: {}", e);
            Ok(Json(Vec::new()))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /chat - Answer a chat message
async fn chat<G>(
    State(state): State<AppState<G>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError>
where
    G: TextGenerator + 'static,
{
    let Json(request) = payload?;

    let response = match state.assistant.chat(&request.message).await {
        Ok(reply) => reply,
        Err(e) if e.is_service_failure() => {
            warn!("Error in chat response: {}", e);
            CHAT_FALLBACK_MESSAGE.to_string()
        }
        Err(e) => return Err(e.into()),
    };

    Ok(Json(ChatResponse { response }))
}

/// GET / - Static index page
async fn index<G>(State(state): State<AppState<G>>) -> Result<Html<String>, AppError>
where
    G: TextGenerator + 'static,
{
    match &state.index_page {
        IndexPage::Embedded => Ok(Html(EMBEDDED_INDEX.to_string())),
        IndexPage::File(path) => tokio::fs::read_to_string(path)
            .await
            .map(Html)
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Failed to read index page {}: {}",
                    path.display(),
                    e
                ))
            }),
    }
}

/// GET /health - Liveness check
async fn health_check<G>(State(state): State<AppState<G>>) -> Json<HealthCheckResponse>
where
    G: TextGenerator + 'static,
{
    Json(HealthCheckResponse {
        status: "ok".to_string(),
        model: state.assistant.model_name().to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<G>(state: AppState<G>) -> AxumRouter
where
    G: TextGenerator + 'static,
{
    info!("Registering routes: GET /, GET /health, POST /chat, POST /recommend");

    AxumRouter::new()
        .route("/", get(index::<G>))
        .route("/health", get(health_check::<G>))
        .route("/chat", post(chat::<G>))
        .route("/recommend", post(recommend::<G>))
        .with_state(state)
}
