#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use phone_bazaar::auth::jwt::{IdentityClaims, encode_identity_token};
use phone_bazaar::config::{Config, Environment};
use phone_bazaar::payments::{MockGateway, PaymentGateway};
use phone_bazaar::state::AppState;

pub const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";
pub const ADMIN_EMAIL: &str = "admin@example.com";

// ─────────────────────────────────────────────────────────────────────────────
// Test Infrastructure
// ─────────────────────────────────────────────────────────────────────────────

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: std::net::IpAddr::from([127, 0, 0, 1]),
        server_port: 0,
        environment: Environment::Development,
        log_level: "warn".to_string(),
        identity_token_secret: TEST_SECRET.to_string(),
        identity_token_issuer: None,
        admin_emails: vec![ADMIN_EMAIL.to_string()],
        frontend_url: "http://localhost:5173".to_string(),
        seed_sample_data: false,
    }
}

/// Fresh in-memory database with migrations applied, settling payments with `payments`.
pub async fn test_state_with_gateway(payments: Arc<dyn PaymentGateway>) -> AppState {
    let db = phone_bazaar::db::connect_and_migrate("sqlite::memory:")
        .await
        .unwrap_or_default();

    AppState {
        db,
        config: test_config(),
        payments,
    }
}

pub async fn test_state() -> AppState {
    test_state_with_gateway(Arc::new(MockGateway)).await
}

pub fn app_for(state: AppState) -> Router {
    phone_bazaar::routes::router().with_state(state)
}

pub async fn test_app() -> Router {
    app_for(test_state().await)
}

/// Identity token for `user_id`, as the identity provider would issue it.
pub fn token_for(user_id: &str, email: &str, first_name: &str) -> String {
    let mut claims = IdentityClaims::new(user_id, 3600);
    claims.email = Some(email.to_string());
    claims.first_name = Some(first_name.to_string());
    claims.last_name = Some("Tester".to_string());
    encode_identity_token(&claims, TEST_SECRET).unwrap_or_default()
}

pub fn admin_token() -> String {
    token_for("admin-1", ADMIN_EMAIL, "Ada")
}

pub fn parse(body: &str) -> Value {
    serde_json::from_str(body).unwrap_or_default()
}

/// Minimal valid listing body.
pub fn listing_body(brand: &str, model: &str, price: f64) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "storage": "128GB",
        "color": "Graphite",
        "condition": "good",
        "price": price,
        "description": format!("{brand} {model} in good shape"),
        "images": ["https://img.example.com/1.jpg"],
        "location": "Mumbai",
        "specifications": { "ram": "6GB" },
        "accessories": ["charger"]
    })
}

/// Create a listing as `token` and return its id.
pub async fn create_listing(app: &Router, token: &str, body: &Value) -> i64 {
    let (status, resp) = post_json_with_auth(app, "/api/mobiles", body, token).await;
    assert_eq!(status, StatusCode::CREATED, "create listing failed: {resp}");
    parse(&resp)["id"].as_i64().unwrap_or_default()
}

/// Create a listing and have the admin approve it. Returns its id.
pub async fn create_approved_listing(app: &Router, token: &str, body: &Value) -> i64 {
    let id = create_listing(app, token, body).await;
    let (status, resp) = put_json_with_auth(
        app,
        &format!("/api/admin/mobiles/{id}/approve"),
        &json!({}),
        &admin_token(),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "approve failed: {resp}");
    id
}

// ─────────────────────────────────────────────────────────────────────────────
// Request Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Send `request` to the app and return (status, body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap_or_default();

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .unwrap_or_default();
    let body_str = String::from_utf8(body.to_vec()).unwrap_or_default();

    (status, body_str)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn get_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap_or_default();
    send(app, request).await
}

pub async fn post_json_with_auth(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, String) {
    json_with_auth(app, "POST", uri, body, token).await
}

pub async fn put_json_with_auth(
    app: &Router,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, String) {
    json_with_auth(app, "PUT", uri, body, token).await
}

pub async fn delete_with_auth(app: &Router, uri: &str, token: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap_or_default();
    send(app, request).await
}

async fn json_with_auth(
    app: &Router,
    method: &str,
    uri: &str,
    body: &Value,
    token: &str,
) -> (StatusCode, String) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap_or_default();
    send(app, request).await
}
