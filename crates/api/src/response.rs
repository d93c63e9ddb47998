//! Shared response envelope for API handlers.
//!
//! Every successful response is `{ "success": true, "message": ..., "data": ... }`.
//! Failures use the same shape with `code` instead of `data`; see
//! [`crate::error::AppError`].

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
            data,
        })
    }

    /// A `201 Created` response carrying the new resource.
    pub fn created(message: impl Into<String>, data: T) -> (StatusCode, Json<Self>) {
        (StatusCode::CREATED, Self::ok(message, data))
    }
}
