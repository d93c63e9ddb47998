pub mod admin;
pub mod auth;
pub mod bookings;
pub mod events;
pub mod health;
pub mod organizer;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                          signup (public)
/// /auth/login                           login (public)
/// /auth/refresh                         refresh (public)
/// /auth/logout                          logout (auth)
///
/// /users/me                             get, update own profile (auth)
/// /admin/users/{id}/role                set role (admin)
///
/// /events                               list (optional auth), create (organizer)
/// /events/organizer                     own events (organizer)
/// /events/recommendations               ranked upcoming events (optional auth)
/// /events/{id}                          get, update (owner), soft-delete (owner)
///
/// /bookings                             create (auth)
/// /bookings/my                          caller's bookings (auth)
/// /bookings/{id}                        get (owner or event organizer)
/// /bookings/{id}/confirm-payment        mark paid (owner)
///
/// /organizer/stats                      analytics (organizer)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/admin", admin::router())
        .nest("/events", events::router())
        .nest("/bookings", bookings::router())
        .nest("/organizer", organizer::router())
}
