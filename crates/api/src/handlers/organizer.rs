//! Organizer analytics.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use eventhub_core::analytics::{aggregate, BookingRecord, EventRecord, OrganizerStats};
use eventhub_core::lifecycle::refresh_status;
use eventhub_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::extract::QueryParams;
use crate::middleware::rbac::RequireOrganizer;
use crate::query::StatsParams;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/organizer/stats?period=week|month|year|all
///
/// Defaults to `month`.
pub async fn stats(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
    QueryParams(params): QueryParams<StatsParams>,
) -> AppResult<Json<ApiResponse<OrganizerStats>>> {
    let now = Utc::now();
    let tz = state.config.event_timezone;
    let period = params.period.unwrap_or_default();

    let events: Vec<EventRecord> = StatsRepo::organizer_events(&state.pool, user.user_id)
        .await?
        .into_iter()
        .map(|row| EventRecord {
            id: row.id,
            title: row.title,
            category: row.category,
            status: refresh_status(row.status, row.date, now, &tz),
            created_at: row.created_at,
        })
        .collect();

    let bookings: Vec<BookingRecord> =
        StatsRepo::organizer_bookings(&state.pool, user.user_id, period.window_start(now))
            .await?
            .into_iter()
            .map(BookingRecord::from)
            .collect();

    let stats = aggregate(period, now, &events, &bookings);
    Ok(ApiResponse::ok("Organizer statistics retrieved", stats))
}
