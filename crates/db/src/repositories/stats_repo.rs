//! Read-only queries feeding organizer analytics.

use eventhub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::stats::{OrganizerBookingRow, OrganizerEventRow};

/// Analytics source rows.
pub struct StatsRepo;

impl StatsRepo {
    /// Every event the organizer created, soft-deleted ones included.
    pub async fn organizer_events(
        pool: &PgPool,
        organizer_id: DbId,
    ) -> Result<Vec<OrganizerEventRow>, sqlx::Error> {
        sqlx::query_as::<_, OrganizerEventRow>(
            "SELECT id, title, category, status, date, created_at
             FROM events
             WHERE organizer_id = $1
             ORDER BY created_at DESC, id DESC",
        )
        .bind(organizer_id)
        .fetch_all(pool)
        .await
    }

    /// Bookings against the organizer's events made at or after `since`
    /// (all of them when `since` is `None`).
    pub async fn organizer_bookings(
        pool: &PgPool,
        organizer_id: DbId,
        since: Option<Timestamp>,
    ) -> Result<Vec<OrganizerBookingRow>, sqlx::Error> {
        sqlx::query_as::<_, OrganizerBookingRow>(
            "SELECT b.event_id, b.ticket_type, b.quantity, b.total_price,
                    b.payment_status, b.status, b.created_at
             FROM bookings b
             JOIN events e ON e.id = b.event_id
             WHERE e.organizer_id = $1
               AND ($2::TIMESTAMPTZ IS NULL OR b.created_at >= $2)",
        )
        .bind(organizer_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
