use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the database is unreachable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let db_healthy = eventhub_db::health_check(&state.pool).await.is_ok();
    let status = if db_healthy { "ok" } else { "degraded" };

    ApiResponse::ok(
        "Service health",
        HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        },
    )
}

/// Health routes, mounted at the root rather than under `/api/v1`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
