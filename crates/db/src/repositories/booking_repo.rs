//! Repository for the `bookings` table.

use eventhub_core::booking::{BookingStatus, PaymentStatus};
use eventhub_core::catalog::TicketType;
use eventhub_core::types::DbId;
use sqlx::PgPool;

use crate::models::booking::{Booking, BookingHistoryRow, BookingWithEvent, CreateBooking};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, event_id, ticket_type, quantity, ticket_price, total_price, \
                       payment_status, status, cancellation_reason, created_at, updated_at";

/// Booking columns qualified with the `b` alias, for joins.
const JOINED_COLUMNS: &str = "b.id, b.user_id, b.event_id, b.ticket_type, b.quantity, \
                              b.ticket_price, b.total_price, b.payment_status, b.status, \
                              b.cancellation_reason, b.created_at, b.updated_at";

/// Booking ledger storage.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a booking, returning the created row.
    ///
    /// A second active booking for the same user, event and ticket type
    /// fails with a unique violation on `uq_bookings_active_user_event_ticket`.
    pub async fn create(pool: &PgPool, input: &CreateBooking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings
                (user_id, event_id, ticket_type, quantity, ticket_price, total_price, payment_status)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(input.user_id)
            .bind(input.event_id)
            .bind(input.ticket_type.as_str())
            .bind(input.quantity)
            .bind(input.ticket_price)
            .bind(input.total_price)
            .bind(input.payment_status.as_str())
            .fetch_one(pool)
            .await
    }

    /// Find a booking by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = $1");
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Whether the user already holds an active booking for this event and
    /// ticket type.
    pub async fn has_active(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
        ticket_type: TicketType,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                 SELECT 1 FROM bookings
                 WHERE user_id = $1 AND event_id = $2 AND ticket_type = $3 AND status = $4
             )",
        )
        .bind(user_id)
        .bind(event_id)
        .bind(ticket_type.as_str())
        .bind(BookingStatus::Active.as_str())
        .fetch_one(pool)
        .await
    }

    /// A user's bookings with event headline fields, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookingWithEvent>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS},
                    e.title AS event_title,
                    e.date AS event_date,
                    e.location AS event_location,
                    e.category AS event_category
             FROM bookings b
             JOIN events e ON e.id = b.event_id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC, b.id DESC"
        );
        sqlx::query_as::<_, BookingWithEvent>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// All bookings for an event, oldest first.
    pub async fn list_for_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE event_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Event attributes of the user's `limit` most recent bookings.
    pub async fn recent_history(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<BookingHistoryRow>, sqlx::Error> {
        sqlx::query_as::<_, BookingHistoryRow>(
            "SELECT e.category, e.organizer_id, e.location
             FROM bookings b
             LEFT JOIN events e ON e.id = b.event_id
             WHERE b.user_id = $1
             ORDER BY b.created_at DESC, b.id DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Move an active booking from `Pending` to `Paid`.
    ///
    /// Returns `None` when the booking is missing, cancelled or already paid.
    pub async fn mark_paid(pool: &PgPool, id: DbId) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!(
            "UPDATE bookings SET payment_status = $2
             WHERE id = $1 AND status = $3 AND payment_status = $4
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Booking>(&query)
            .bind(id)
            .bind(PaymentStatus::Paid.as_str())
            .bind(BookingStatus::Active.as_str())
            .bind(PaymentStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }
}
