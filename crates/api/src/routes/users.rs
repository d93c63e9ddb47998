use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(users::get_me).put(users::update_me))
}
