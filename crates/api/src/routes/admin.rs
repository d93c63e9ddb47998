use axum::routing::put;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`. Every handler requires the admin role.
pub fn router() -> Router<AppState> {
    Router::new().route("/users/{id}/role", put(admin::set_user_role))
}
