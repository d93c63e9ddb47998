//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{events, recommendations};
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// GET    /                 -> list_events
/// POST   /                 -> create_event
/// GET    /organizer        -> list_organizer_events
/// GET    /recommendations  -> recommend
/// GET    /{id}             -> get_event
/// PUT    /{id}             -> update_event
/// DELETE /{id}             -> delete_event
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list_events).post(events::create_event))
        .route("/organizer", get(events::list_organizer_events))
        .route("/recommendations", get(recommendations::recommend))
        .route(
            "/{id}",
            get(events::get_event)
                .put(events::update_event)
                .delete(events::delete_event),
        )
}
