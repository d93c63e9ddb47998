//! Health check and general HTTP behaviour.

mod common;

use axum::http::StatusCode;
use common::{body_json, expect_data, expect_error, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_database(pool: PgPool) {
    let app = common::build_test_app(pool);
    let data = expect_data(get(app, "/health").await, StatusCode::OK).await;

    assert_eq!(data["status"], "ok");
    assert_eq!(data["db_healthy"], true);
    assert!(data["version"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_route_uses_error_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let json = expect_error(
        get(app, "/api/v1/does-not-exist").await,
        StatusCode::NOT_FOUND,
        "NOT_FOUND",
    )
    .await;
    assert_eq!(json["message"], "Route not found");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn responses_carry_request_id(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/health").await;

    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap()
        .to_string();
    assert_eq!(request_id.len(), 36);
    body_json(response).await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_path_id_is_bad_request(pool: PgPool) {
    let app = common::build_test_app(pool);
    expect_error(
        get(app, "/api/v1/events/not-a-number").await,
        StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
    )
    .await;
}
