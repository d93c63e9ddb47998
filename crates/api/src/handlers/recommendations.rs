//! Personalized event recommendations.

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use eventhub_core::lifecycle::{next_day_start, EventStatus};
use eventhub_core::recommendation::{
    rank, BookingSignal, PreferenceProfile, Ranked, CANDIDATE_LIMIT, HISTORY_LIMIT,
};
use eventhub_db::repositories::{BookingRepo, EventRepo};

use crate::error::AppResult;
use crate::handlers::events::EventResponse;
use crate::middleware::auth::OptionalAuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/events/recommendations
///
/// Anonymous callers get an empty list without touching the database.
pub async fn recommend(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
) -> AppResult<Json<ApiResponse<Vec<Ranked<EventResponse>>>>> {
    let Some(user) = caller else {
        return Ok(ApiResponse::ok("Recommendations retrieved", Vec::new()));
    };

    let now = Utc::now();
    let tz = state.config.event_timezone;

    let history: Vec<BookingSignal> =
        BookingRepo::recent_history(&state.pool, user.user_id, HISTORY_LIMIT)
            .await?
            .into_iter()
            .map(BookingSignal::from)
            .collect();
    let profile = PreferenceProfile::from_history(&history);

    let candidates = EventRepo::list_recommendation_candidates(
        &state.pool,
        user.user_id,
        next_day_start(now, &tz),
        CANDIDATE_LIMIT,
    )
    .await?
    .into_iter()
    .map(|event| {
        let features = event.features();
        (features, EventResponse::new(event, now, &tz))
    })
    .filter(|(_, event)| event.status == EventStatus::Upcoming)
    .collect();

    let ranked = rank(&profile, candidates, now);
    tracing::debug!(
        user_id = user.user_id,
        history = history.len(),
        results = ranked.len(),
        "Recommendations computed"
    );
    Ok(ApiResponse::ok("Recommendations retrieved", ranked))
}
