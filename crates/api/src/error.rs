use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use eventhub_core::error::CoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Every variant renders as `{ "success": false, "message": ..., "code": ... }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `eventhub_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request input (body, query string or path).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message. Never shown to clients.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::InvalidDate(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_DATE", msg.clone())
                }
                CoreError::EventClosed(msg) => {
                    (StatusCode::BAD_REQUEST, "EVENT_CLOSED", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_MESSAGE.to_string(),
                    )
                }
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        };

        error_response(status, code, message)
    }
}

/// Render the failure envelope. Also used by the router fallback.
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    let body = json!({
        "success": false,
        "message": message.into(),
        "code": code,
    });
    (status, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique_violation
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        conflict_message(constraint),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

fn conflict_message(constraint: &str) -> String {
    match constraint {
        "uq_users_username" => "Username is already taken".to_string(),
        "uq_users_email" => "Email is already registered".to_string(),
        "uq_bookings_active_user_event_ticket" => {
            "You have already booked this ticket type for this event".to_string()
        }
        other => format!("Duplicate value violates unique constraint: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn core_errors_map_to_codes() {
        let cases = [
            (CoreError::Validation("x".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (CoreError::InvalidDate("x".into()), StatusCode::BAD_REQUEST, "INVALID_DATE"),
            (CoreError::EventClosed("x".into()), StatusCode::BAD_REQUEST, "EVENT_CLOSED"),
            (CoreError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (CoreError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (CoreError::Forbidden("x".into()), StatusCode::FORBIDDEN, "FORBIDDEN"),
        ];
        for (err, status, code) in cases {
            let (got_status, body) = render(AppError::Core(err)).await;
            assert_eq!(got_status, status);
            assert_eq!(body["code"], code);
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "x");
        }
    }

    #[tokio::test]
    async fn not_found_names_the_entity() {
        let (status, body) = render(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: 7,
        }))
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Event with id 7 not found");
    }

    #[tokio::test]
    async fn internal_details_are_hidden() {
        let (status, body) = render(AppError::InternalError("secret detail".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], INTERNAL_MESSAGE);

        let (status, _) = render(AppError::Database(sqlx::Error::PoolTimedOut)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
