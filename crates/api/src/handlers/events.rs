//! Handlers for the `/events` resource.
//!
//! Stored statuses are re-derived on every read, so responses never show an
//! event as `Upcoming` after its day has started.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{FixedOffset, Utc};
use eventhub_core::catalog::{
    ensure_owner, ensure_viewable, status_for_new_event, validate_event_date, validate_tiers,
    EventCategory, ListScope, TicketTier, EVENT_DELETED_REASON,
};
use eventhub_core::error::CoreError;
use eventhub_core::lifecycle::{day_start, refresh_status, resolve_status, EventStatus};
use eventhub_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIMIT, MAX_LIMIT};
use eventhub_core::types::{DbId, Timestamp};
use eventhub_db::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};
use eventhub_db::repositories::EventRepo;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{not_blank, PathParam, QueryParams, ValidatedJson};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::middleware::rbac::RequireOrganizer;
use crate::query::EventListParams;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /events`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 5000), custom(function = "not_blank"))]
    pub description: String,
    pub date: Timestamp,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub location: String,
    pub category: EventCategory,
    #[validate(url)]
    pub banner_url: Option<String>,
    pub tickets: Vec<TicketTier>,
}

/// Request body for `PUT /events/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000), custom(function = "not_blank"))]
    pub description: Option<String>,
    pub date: Option<Timestamp>,
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub location: Option<String>,
    pub category: Option<EventCategory>,
    #[validate(url)]
    pub banner_url: Option<String>,
    pub tickets: Option<Vec<TicketTier>>,
}

/// An event as returned to clients, with its status refreshed.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: DbId,
    pub organizer_id: DbId,
    pub title: String,
    pub description: String,
    pub date: Timestamp,
    pub location: String,
    pub category: EventCategory,
    pub banner_url: Option<String>,
    pub status: EventStatus,
    pub tickets: Vec<TicketTier>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl EventResponse {
    pub fn new(event: Event, now: Timestamp, tz: &FixedOffset) -> Self {
        Self {
            status: refresh_status(event.status, event.date, now, tz),
            id: event.id,
            organizer_id: event.organizer_id,
            title: event.title,
            description: event.description,
            date: event.date,
            location: event.location,
            category: event.category,
            banner_url: event.banner_url,
            tickets: event.tickets.0,
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteEventResponse {
    pub id: DbId,
    pub cancelled_bookings: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// Organizers get their own catalog; everyone else gets live public events.
pub async fn list_events(
    State(state): State<AppState>,
    OptionalAuthUser(caller): OptionalAuthUser,
    QueryParams(params): QueryParams<EventListParams>,
) -> AppResult<Json<ApiResponse<Vec<EventResponse>>>> {
    let now = Utc::now();
    let tz = state.config.event_timezone;
    let filter = event_filter(params);

    let events = match ListScope::for_caller(caller.map(|u| (u.user_id, u.role))) {
        ListScope::OwnedBy(organizer_id) => {
            EventRepo::list_by_organizer(&state.pool, organizer_id, &filter)
                .await?
                .into_iter()
                .map(|e| EventResponse::new(e, now, &tz))
                .collect()
        }
        ListScope::Public => EventRepo::list_public(&state.pool, day_start(now, &tz), &filter)
            .await?
            .into_iter()
            .map(|e| EventResponse::new(e, now, &tz))
            .filter(|e| e.status.is_public())
            .collect(),
    };

    Ok(ApiResponse::ok("Events retrieved", events))
}

/// GET /api/v1/events/organizer
pub async fn list_organizer_events(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
    QueryParams(params): QueryParams<EventListParams>,
) -> AppResult<Json<ApiResponse<Vec<EventResponse>>>> {
    let now = Utc::now();
    let tz = state.config.event_timezone;
    let events = EventRepo::list_by_organizer(&state.pool, user.user_id, &event_filter(params))
        .await?
        .into_iter()
        .map(|e| EventResponse::new(e, now, &tz))
        .collect();
    Ok(ApiResponse::ok("Organizer events retrieved", events))
}

/// GET /api/v1/events/{id}
pub async fn get_event(
    State(state): State<AppState>,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<EventResponse>>> {
    let event = find_any_event(&state, id).await?;
    let response = EventResponse::new(event, Utc::now(), &state.config.event_timezone);
    ensure_viewable(response.status)?;
    Ok(ApiResponse::ok("Event retrieved", response))
}

/// POST /api/v1/events
pub async fn create_event(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
    ValidatedJson(input): ValidatedJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<EventResponse>>)> {
    let now = Utc::now();
    let tz = state.config.event_timezone;
    validate_tiers(&input.tickets)?;
    let status = status_for_new_event(input.date, now, &tz)?;

    let event = EventRepo::create(
        &state.pool,
        &CreateEvent {
            organizer_id: user.user_id,
            title: input.title.trim().to_string(),
            description: input.description,
            date: input.date,
            location: input.location.trim().to_string(),
            category: input.category,
            banner_url: input.banner_url,
            status,
            tickets: input.tickets,
        },
    )
    .await?;

    tracing::info!(event_id = event.id, organizer_id = user.user_id, "Event created");
    Ok(ApiResponse::created(
        "Event created successfully",
        EventResponse::new(event, now, &tz),
    ))
}

/// PUT /api/v1/events/{id}
///
/// Partial update by the owning organizer. The status is re-resolved from
/// the resulting date.
pub async fn update_event(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
    PathParam(id): PathParam<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateEventRequest>,
) -> AppResult<Json<ApiResponse<EventResponse>>> {
    let now = Utc::now();
    let tz = state.config.event_timezone;

    let event = find_live_event(&state, id).await?;
    ensure_owner(event.organizer_id, user.user_id)?;

    if let Some(date) = input.date {
        validate_event_date(date, now)?;
    }
    if let Some(tickets) = &input.tickets {
        validate_tiers(tickets)?;
    }
    let status = resolve_status(input.date.unwrap_or(event.date), now, &tz);

    let patch = UpdateEvent {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        date: input.date,
        location: input.location.map(|l| l.trim().to_string()),
        category: input.category,
        banner_url: input.banner_url,
        tickets: input.tickets,
        status,
    };

    let updated = EventRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(CoreError::NotFound { entity: "Event", id })?;

    tracing::info!(event_id = id, status = %updated.status, "Event updated");
    Ok(ApiResponse::ok(
        "Event updated successfully",
        EventResponse::new(updated, now, &tz),
    ))
}

/// DELETE /api/v1/events/{id}
///
/// Soft-delete by the owner; every active booking is cancelled in the same
/// transaction.
pub async fn delete_event(
    State(state): State<AppState>,
    auth_user: AuthUser,
    PathParam(id): PathParam<DbId>,
) -> AppResult<Json<ApiResponse<DeleteEventResponse>>> {
    let event = find_live_event(&state, id).await?;
    ensure_owner(event.organizer_id, auth_user.user_id)?;

    let cancelled_bookings = EventRepo::soft_delete_with_bookings(
        &state.pool,
        id,
        auth_user.user_id,
        EVENT_DELETED_REASON,
    )
    .await?
    .ok_or(CoreError::NotFound { entity: "Event", id })?;

    tracing::info!(event_id = id, cancelled_bookings, "Event deleted");
    Ok(ApiResponse::ok(
        "Event deleted successfully",
        DeleteEventResponse {
            id,
            cancelled_bookings,
        },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub(crate) async fn find_live_event(state: &AppState, id: DbId) -> Result<Event, AppError> {
    EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Event", id }.into())
}

/// Like [`find_live_event`] but also returns soft-deleted rows, which carry
/// `Canceled` and are rejected by the status checks downstream.
pub(crate) async fn find_any_event(state: &AppState, id: DbId) -> Result<Event, AppError> {
    EventRepo::find_by_id_include_deleted(&state.pool, id)
        .await?
        .ok_or_else(|| CoreError::NotFound { entity: "Event", id }.into())
}

fn event_filter(params: EventListParams) -> EventFilter {
    EventFilter {
        category: params.category,
        search: params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        limit: clamp_limit(params.limit, DEFAULT_LIMIT, MAX_LIMIT),
        offset: clamp_offset(params.offset),
    }
}
