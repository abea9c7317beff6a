//! Integration tests for the server

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt; // for oneshot
use verdant_assistant::{Assistant, AssistantConfig, MarkerMatching, CHAT_FALLBACK_MESSAGE};
use verdant_llm::MockProvider;
use verdant_server::{
    config::ServerConfig,
    handlers::{create_router, AppState, ChatResponse, ErrorResponse, HealthCheckResponse, IndexPage},
};

const COMPLETION: &str = "Great choices for a greener kitchen:

- Product name: Beeswax Food Wraps
- Brief description: Reusable wraps that replace cling film
- Environmental impact reduction: Cuts single-use plastic
- Price range: $15-$25

- Product name: Compost Bin
- Brief description: Countertop bin with charcoal filter
- Environmental impact reduction: Diverts food scraps from landfill
- Price range: $30-$45

Happy shopping!";

/// Helper to create test application state
fn create_test_state(llm: MockProvider) -> AppState<MockProvider> {
    create_test_state_with(llm, AssistantConfig::default())
}

fn create_test_state_with(llm: MockProvider, config: AssistantConfig) -> AppState<MockProvider> {
    AppState {
        assistant: Arc::new(Assistant::new(llm, config).unwrap()),
        index_page: IndexPage::Embedded,
    }
}

fn post_json(uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

#[tokio::test]
async fn test_recommend_endpoint() {
    let llm = MockProvider::new(COMPLETION);
    let app = create_router(create_test_state(llm.clone()));

    let response = app
        .oneshot(post_json("/recommend", r#"{"category": "kitchen", "budget": 50}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let products: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    let products = products.as_array().unwrap();
    assert_eq!(products.len(), 2);
    assert_eq!(products[0]["name"], "Beeswax Food Wraps");
    assert_eq!(products[0]["impact_reduction"], "Cuts single-use plastic");
    assert_eq!(products[1]["price_range"], "$30-$45");

    // Preferences reach the prompt
    assert!(llm.prompts()[0].contains(r#""category":"kitchen""#));
}

#[tokio::test]
async fn test_recommend_omits_absent_fields() {
    let llm = MockProvider::new("- Product name: Bamboo Toothbrush");
    let app = create_router(create_test_state(llm));

    let response = app.oneshot(post_json("/recommend", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let products: Value = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(products, json!([{"name": "Bamboo Toothbrush"}]));
}

#[tokio::test]
async fn test_recommend_unstructured_completion() {
    let llm = MockProvider::new("Try a bamboo toothbrush!");
    let app = create_router(create_test_state(llm));

    let response = app.oneshot(post_json("/recommend", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, b"[]");
}

#[tokio::test]
async fn test_recommend_service_failure() {
    let app = create_router(create_test_state(MockProvider::failing()));

    let response = app
        .oneshot(post_json("/recommend", r#"{"category": "garden"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, b"[]");
}

#[tokio::test]
async fn test_recommend_rejects_non_object() {
    let llm = MockProvider::new(COMPLETION);
    let app = create_router(create_test_state(llm.clone()));

    let response = app
        .oneshot(post_json("/recommend", r#"["kitchen"]"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(error.error.contains("JSON object"));
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn test_recommend_rejects_malformed_json() {
    let app = create_router(create_test_state(MockProvider::new(COMPLETION)));

    let response = app
        .oneshot(post_json("/recommend", r#"{"category": "#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_recommend_requires_json_content_type() {
    let app = create_router(create_test_state(MockProvider::new(COMPLETION)));

    let request = Request::builder()
        .method("POST")
        .uri("/recommend")
        .body(Body::from("{}"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_recommend_lenient_markers() {
    let llm = MockProvider::new("* **Product name:** Steel Bottle\n   * **Price range:** $20");
    let config = AssistantConfig {
        marker_matching: MarkerMatching::Lenient,
        ..AssistantConfig::default()
    };
    let app = create_router(create_test_state_with(llm, config));

    let response = app.oneshot(post_json("/recommend", "{}")).await.unwrap();
    let products: Value = serde_json::from_slice(&read_body(response).await).unwrap();

    assert_eq!(products, json!([{"name": "Steel Bottle", "price_range": "$20"}]));
}

#[tokio::test]
async fn test_chat_endpoint() {
    let llm = MockProvider::new("Rinse jars and put them in the glass bin.");
    let app = create_router(create_test_state(llm.clone()));

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "How do I recycle jars?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat: ChatResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(chat.response, "Rinse jars and put them in the glass bin.");
    assert!(llm.prompts()[0].ends_with("User Message: How do I recycle jars?"));
}

#[tokio::test]
async fn test_chat_missing_message_is_empty() {
    let llm = MockProvider::new("What would you like to know?");
    let app = create_router(create_test_state(llm.clone()));

    let response = app.oneshot(post_json("/chat", "{}")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(llm.prompts()[0].ends_with("User Message: "));
}

#[tokio::test]
async fn test_chat_service_failure_returns_fallback() {
    let app = create_router(create_test_state(MockProvider::failing()));

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let chat: ChatResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(chat.response, CHAT_FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_chat_message_too_long() {
    let llm = MockProvider::new("unused");
    let config = AssistantConfig {
        max_message_length: 10,
        ..AssistantConfig::default()
    };
    let app = create_router(create_test_state_with(llm, config));

    let response = app
        .oneshot(post_json("/chat", r#"{"message": "this message is far too long"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(error.error.contains("too long"));
}

#[tokio::test]
async fn test_chat_rejects_wrong_message_type() {
    let app = create_router(create_test_state(MockProvider::default()));

    let response = app
        .oneshot(post_json("/chat", r#"{"message": 42}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let error: ErrorResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert!(!error.error.is_empty());
}

#[tokio::test]
async fn test_index_page_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, "<h1>Custom</h1>").unwrap();

    let mut state = create_test_state(MockProvider::default());
    state.index_page = IndexPage::File(path);
    let app = create_router(state);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_body(response).await, b"<h1>Custom</h1>");
}

#[tokio::test]
async fn test_health_check_endpoint() {
    let app = create_router(create_test_state(MockProvider::default()));

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthCheckResponse = serde_json::from_slice(&read_body(response).await).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.model, "mock");
}

#[test]
fn test_server_config_from_toml() {
    let toml = r#"
        bind_address = "0.0.0.0"
        bind_port = 9000

        [llm]
        api_key = "my-key"

        [assistant]
        min_products = 2
        max_products = 4
    "#;

    let config: ServerConfig = toml::from_str(toml).unwrap();
    assert_eq!(config.bind_addr(), "0.0.0.0:9000");
    assert_eq!(config.assistant.min_products, 2);
    assert!(config.validate().is_ok());
}
