use axum::routing::get;
use axum::Router;

use crate::handlers::organizer;
use crate::state::AppState;

/// Routes mounted at `/organizer`.
pub fn router() -> Router<AppState> {
    Router::new().route("/stats", get(organizer::stats))
}
