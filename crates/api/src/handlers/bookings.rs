//! Handlers for the `/bookings` resource (the booking ledger).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use eventhub_core::booking::{ensure_payment_confirmable, prepare_booking, BookableEvent};
use eventhub_core::catalog::TicketType;
use eventhub_core::error::CoreError;
use eventhub_core::types::DbId;
use eventhub_db::models::booking::{Booking, BookingWithEvent, CreateBooking};
use eventhub_db::repositories::{BookingRepo, EventRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{PathParam, ValidatedJson};
use crate::handlers::events::find_any_event;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /bookings`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[serde(alias = "eventId")]
    pub event_id: DbId,
    #[serde(alias = "ticketType")]
    pub ticket_type: TicketType,
    #[validate(range(min = 1, max = 1000))]
    pub quantity: i32,
}

/// POST /api/v1/bookings
///
/// Checks run in order: event exists, event is still open (a soft-deleted
/// event is `Canceled`), ticket type is offered, no active duplicate. The partial unique index on active bookings
/// turns a lost race into the same 409 as the explicit duplicate check.
pub async fn create_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Booking>>)> {
    let event = find_any_event(&state, input.event_id).await?;

    let has_active = BookingRepo::has_active(
        &state.pool,
        auth_user.user_id,
        event.id,
        input.ticket_type,
    )
    .await?;

    let quote = prepare_booking(
        &BookableEvent {
            status: event.status,
            date: event.date,
            tickets: &event.tickets.0,
        },
        input.ticket_type,
        input.quantity,
        has_active,
        Utc::now(),
        &state.config.event_timezone,
        state.config.unmatched_tier_policy,
    )?;

    let booking = BookingRepo::create(
        &state.pool,
        &CreateBooking {
            user_id: auth_user.user_id,
            event_id: event.id,
            ticket_type: input.ticket_type,
            quantity: input.quantity,
            ticket_price: quote.ticket_price,
            total_price: quote.total_price,
            payment_status: quote.payment_status,
        },
    )
    .await?;

    tracing::info!(
        booking_id = booking.id,
        event_id = event.id,
        user_id = auth_user.user_id,
        ticket_type = %booking.ticket_type,
        total_price = booking.total_price,
        "Booking created"
    );
    Ok(ApiResponse::created("Booking created successfully", booking))
}

/// GET /api/v1/bookings/my
pub async fn list_my_bookings(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<Vec<BookingWithEvent>>>> {
    let bookings = BookingRepo::list_for_user(&state.pool, auth_user.user_id).await?;
    Ok(ApiResponse::ok("Bookings retrieved", bookings))
}

/// GET /api/v1/bookings/{id}
///
/// Visible to the booking's owner and to the event's organizer.
pub async fn get_booking(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = find_booking(&state, id).await?;

    if booking.user_id != auth_user.user_id {
        let organizer_id = EventRepo::find_by_id_include_deleted(&state.pool, booking.event_id)
            .await?
            .map(|e| e.organizer_id);
        if organizer_id != Some(auth_user.user_id) {
            return Err(CoreError::Forbidden(
                "You are not allowed to view this booking".to_string(),
            )
            .into());
        }
    }

    Ok(ApiResponse::ok("Booking retrieved", booking))
}

/// POST /api/v1/bookings/{id}/confirm-payment
///
/// Records a successful payment for the owner's pending booking.
pub async fn confirm_payment(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<Booking>>> {
    let booking = find_booking(&state, id).await?;
    if booking.user_id != auth_user.user_id {
        return Err(CoreError::Forbidden(
            "You are not allowed to pay for this booking".to_string(),
        )
        .into());
    }
    ensure_payment_confirmable(booking.status, booking.payment_status)?;

    // The conditional update loses to a concurrent confirm or cancellation.
    let paid = BookingRepo::mark_paid(&state.pool, id).await?.ok_or_else(|| {
        CoreError::Conflict("Booking can no longer be confirmed".to_string())
    })?;

    tracing::info!(booking_id = id, user_id = auth_user.user_id, "Payment confirmed");
    Ok(ApiResponse::ok("Payment confirmed", paid))
}

async fn find_booking(state: &AppState, id: DbId) -> Result<Booking, AppError> {
    BookingRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Booking", id }.into())
}
