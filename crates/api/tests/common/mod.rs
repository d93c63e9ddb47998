//! Shared harness for HTTP integration tests.
//!
//! Every test builds the production router via `build_app_router` and drives
//! it with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use chrono::{Duration, FixedOffset, Utc};
use eventhub_api::auth::jwt::{generate_access_token, JwtConfig};
use eventhub_api::auth::password::hash_password;
use eventhub_api::config::ServerConfig;
use eventhub_api::router::build_app_router;
use eventhub_api::state::AppState;
use eventhub_core::booking::UnmatchedTierPolicy;
use eventhub_core::roles::Role;
use eventhub_db::models::user::{CreateUser, User};
use eventhub_db::repositories::UserRepo;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Config with safe defaults and a fixed signing secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        event_timezone: FixedOffset::east_opt(0).unwrap(),
        unmatched_tier_policy: UnmatchedTierPolicy::Reject,
        password_min_length: 8,
        status_sweep_interval_secs: 300,
        admin_email: None,
    }
}

pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status, then return the `data` of a success envelope.
pub async fn expect_data(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], true, "unexpected envelope: {json}");
    json["data"].clone()
}

/// Assert the status and error code of a failure envelope.
pub async fn expect_error(response: Response, status: StatusCode, code: &str) -> Value {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["success"], false, "unexpected envelope: {json}");
    assert_eq!(json["code"], code, "unexpected envelope: {json}");
    json
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] and return it with an access token.
pub async fn create_user(pool: &PgPool, username: &str, role: Role) -> (User, String) {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role,
        },
    )
    .await
    .expect("user creation should succeed");
    let token = token_for(&user);
    (user, token)
}

pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, user.role, &test_config().jwt).unwrap()
}

pub fn days_from_now(days: i64) -> String {
    (Utc::now() + Duration::days(days)).to_rfc3339()
}

/// Event body with tiers `[VIP 300 x10, Free 0 x50]`.
pub fn event_body(title: &str, category: &str, days_out: i64) -> Value {
    json!({
        "title": title,
        "description": "An event for integration tests",
        "date": days_from_now(days_out),
        "location": "Berlin",
        "category": category,
        "tickets": [
            { "ticket_type": "VIP", "price": 300, "available_seats": 10 },
            { "ticket_type": "Free", "price": 0, "available_seats": 50 }
        ]
    })
}

/// Create an event through the API and return its `data`.
pub async fn create_event(app: &Router, token: &str, body: Value) -> Value {
    let response = post_json_auth(app.clone(), "/api/v1/events", body, token).await;
    expect_data(response, StatusCode::CREATED).await
}

/// Book through the API and return the raw response.
pub async fn book(app: &Router, token: &str, event_id: &Value, ticket_type: &str, quantity: i32) -> Response {
    post_json_auth(
        app.clone(),
        "/api/v1/bookings",
        json!({ "event_id": event_id, "ticket_type": ticket_type, "quantity": quantity }),
        token,
    )
    .await
}
