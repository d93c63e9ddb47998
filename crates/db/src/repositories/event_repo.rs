//! Repository for the `events` table.

use eventhub_core::booking::BookingStatus;
use eventhub_core::catalog::EventCategory;
use eventhub_core::lifecycle::EventStatus;
use eventhub_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::PgPool;

use super::contains_pattern;
use crate::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, organizer_id, title, description, date, location, category, \
                       banner_url, status, tickets, is_deleted, created_at, updated_at";

/// Provides CRUD and listing operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateEvent) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events
                (organizer_id, title, description, date, location, category, banner_url, status, tickets)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.organizer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.location)
            .bind(input.category.as_str())
            .bind(&input.banner_url)
            .bind(input.status.as_str())
            .bind(Json(&input.tickets))
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: non-deleted events dated on or after `day_start`
    /// (i.e. currently upcoming or ongoing), newest-created first.
    pub async fn list_public(
        pool: &PgPool,
        day_start: Timestamp,
        filter: &EventFilter,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE NOT is_deleted
               AND status <> $1
               AND date >= $2
               AND ($3::TEXT IS NULL OR category = $3)
               AND ($4::TEXT IS NULL OR title ILIKE $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(EventStatus::Canceled.as_str())
            .bind(day_start)
            .bind(filter.category.map(EventCategory::as_str))
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// An organizer's own non-deleted events, any status, newest-created first.
    pub async fn list_by_organizer(
        pool: &PgPool,
        organizer_id: DbId,
        filter: &EventFilter,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE organizer_id = $1
               AND NOT is_deleted
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::TEXT IS NULL OR title ILIKE $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .bind(filter.category.map(EventCategory::as_str))
            .bind(filter.search.as_deref().map(contains_pattern))
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update an event. Only non-`None` fields in `input` are applied; the
    /// status is always overwritten.
    ///
    /// Returns `None` if no live row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                date = COALESCE($4, date),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                banner_url = COALESCE($7, banner_url),
                tickets = COALESCE($8, tickets),
                status = $9
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.date)
            .bind(&input.location)
            .bind(input.category.map(EventCategory::as_str))
            .bind(&input.banner_url)
            .bind(input.tickets.as_ref().map(Json))
            .bind(input.status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an event owned by `organizer_id` and cancel its active
    /// bookings with `reason`, in one transaction.
    ///
    /// Returns the number of bookings cancelled, or `None` if no live event
    /// with that id and owner exists (nothing is written in that case).
    pub async fn soft_delete_with_bookings(
        pool: &PgPool,
        id: DbId,
        organizer_id: DbId,
        reason: &str,
    ) -> Result<Option<u64>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted = sqlx::query(
            "UPDATE events SET is_deleted = true, status = $3
             WHERE id = $1 AND organizer_id = $2 AND NOT is_deleted",
        )
        .bind(id)
        .bind(organizer_id)
        .bind(EventStatus::Canceled.as_str())
        .execute(&mut *tx)
        .await?;

        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let cancelled = sqlx::query(
            "UPDATE bookings SET status = $2, cancellation_reason = $3
             WHERE event_id = $1 AND status = $4",
        )
        .bind(id)
        .bind(BookingStatus::Cancelled.as_str())
        .bind(reason)
        .bind(BookingStatus::Active.as_str())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::debug!(
            event_id = id,
            cancelled = cancelled.rows_affected(),
            "Soft-deleted event and cancelled its bookings"
        );
        Ok(Some(cancelled.rows_affected()))
    }

    /// Upcoming events `user_id` has never booked, newest-created first.
    ///
    /// `upcoming_from` is the start of the next calendar day, so every row
    /// returned currently resolves to `Upcoming`.
    pub async fn list_recommendation_candidates(
        pool: &PgPool,
        user_id: DbId,
        upcoming_from: Timestamp,
        limit: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events e
             WHERE NOT e.is_deleted
               AND e.status <> $2
               AND e.date >= $3
               AND NOT EXISTS (
                   SELECT 1 FROM bookings b WHERE b.event_id = e.id AND b.user_id = $1
               )
             ORDER BY e.created_at DESC, e.id DESC
             LIMIT $4"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(user_id)
            .bind(EventStatus::Canceled.as_str())
            .bind(upcoming_from)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Live upcoming/ongoing events dated before `before`, whose stored
    /// status may have gone stale.
    pub async fn list_status_candidates(
        pool: &PgPool,
        before: Timestamp,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE NOT is_deleted AND status IN ($1, $2) AND date < $3"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(EventStatus::Upcoming.as_str())
            .bind(EventStatus::Ongoing.as_str())
            .bind(before)
            .fetch_all(pool)
            .await
    }

    /// Persist a re-derived status. Returns `true` if the row changed.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: EventStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events SET status = $2 WHERE id = $1 AND NOT is_deleted AND status <> $2",
        )
        .bind(id)
        .bind(status.as_str())
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
