// =============================================================================
// Router integration tests
// =============================================================================
//
// Drive the real router through `tower::ServiceExt::oneshot`. Provider keys
// are left empty, so only the endpoints that never leave the process are
// exercised end-to-end; the provider-backed endpoints are checked for their
// configuration and validation error paths.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stocksense::api::rest;
use stocksense::app_state::AppState;
use stocksense::config::Config;

fn test_app() -> Router {
    let config = Config {
        bind_addr: "127.0.0.1:0".to_string(),
        ..Config::default()
    };
    rest::router(Arc::new(AppState::new(config)))
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(app: &Router, uri: &str, token: Option<&str>) -> axum::response::Response {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let response = get(&app, "/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Auth
// =============================================================================

#[tokio::test]
async fn register_validates_credentials() {
    let app = test_app();

    let response = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "ab", "password": "secret1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "password": "abc"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Invalid username or password");
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let app = test_app();
    let creds = json!({"username": "alice", "password": "secret1"});

    let response = post_json(&app, "/api/auth/register", creds.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["username"], "alice");
    assert!(body["id"].is_string());

    let response = post_json(&app, "/api/auth/register", creds).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn login_requires_credentials() {
    let app = test_app();
    let response = post_json(&app, "/api/auth/login", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Username and password required");
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let app = test_app();
    post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await;

    let response = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "wrong"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "nobody", "password": "secret1"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_lifecycle() {
    let app = test_app();
    let register = post_json(
        &app,
        "/api/auth/register",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await;
    let user = read_json(register).await;

    let login = post_json(
        &app,
        "/api/auth/login",
        json!({"username": "alice", "password": "secret1"}),
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    let body = read_json(login).await;
    let token = body["token"].as_str().unwrap().to_string();

    // Authenticated whoami.
    let me = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(me.status(), StatusCode::OK);
    let body = read_json(me).await;
    assert_eq!(body["userId"], user["id"]);

    // Missing and bogus tokens are rejected.
    let me = get(&app, "/api/auth/me", None).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    let me = get(&app, "/api/auth/me", Some("bogus")).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);

    // Logout invalidates the session.
    let logout = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logout.status(), StatusCode::OK);
    let body = read_json(logout).await;
    assert_eq!(body["message"], "Logged out");

    let me = get(&app, "/api/auth/me", Some(&token)).await;
    assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Provider-backed endpoints — validation and configuration errors
// =============================================================================

#[tokio::test]
async fn chat_requires_question_and_key() {
    let app = test_app();

    let response = post_json(&app, "/api/chat", json!({"question": ""})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Question is required");

    let response = post_json(&app, "/api/chat", json!({"question": "Is AAPL a buy?"})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "OpenAI API key not configured");
}

#[tokio::test]
async fn news_requires_key() {
    let app = test_app();
    let response = get(&app, "/api/news", None).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "News API key not configured");
}

// =============================================================================
// PDF report
// =============================================================================

#[tokio::test]
async fn generate_pdf_validates_fields() {
    let app = test_app();

    let response = post_json(
        &app,
        "/api/generate-pdf",
        json!({"ticker": "AAPL", "question": "Buy?"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn generate_pdf_returns_document() {
    let app = test_app();

    let response = post_json(
        &app,
        "/api/generate-pdf",
        json!({
            "ticker": "AAPL",
            "question": "Is AAPL a buy here?",
            "aiAnalysis": "Momentum is positive and the trend is above both moving averages.",
            "indicators": {
                "sma50": 324.5,
                "sma200": 249.5,
                "volatility": 1.02,
                "roc": 4.18,
                "relativeStrength": null
            }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/pdf"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=stocksense_AAPL_report.pdf"
    );

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.starts_with(b"%PDF"));
}
