use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bookings;
use crate::state::AppState;

/// Routes mounted at `/bookings`.
///
/// ```text
/// POST /                       -> create_booking
/// GET  /my                     -> list_my_bookings
/// GET  /{id}                   -> get_booking
/// POST /{id}/confirm-payment   -> confirm_payment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(bookings::create_booking))
        .route("/my", get(bookings::list_my_bookings))
        .route("/{id}", get(bookings::get_booking))
        .route("/{id}/confirm-payment", post(bookings::confirm_payment))
}
