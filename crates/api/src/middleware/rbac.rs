//! Role-based access control extractors.
//!
//! Each wraps [`AuthUser`] and rejects with 403 when the role falls short.
//! The role is re-read from the database rather than trusted from the token,
//! so a role change takes effect on the caller's next request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventhub_core::error::CoreError;
use eventhub_core::roles::Role;
use eventhub_db::repositories::UserRepo;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a role that can manage events (`organizer` or `admin`).
pub struct RequireOrganizer(pub AuthUser);

impl FromRequestParts<AppState> for RequireOrganizer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = with_stored_role(parts, state).await?;
        if !user.role.can_organize() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Organizer role required".into(),
            )));
        }
        Ok(RequireOrganizer(user))
    }
}

/// Requires the `admin` role.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = with_stored_role(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Authenticate, then replace the token's role claim with the stored role.
async fn with_stored_role(parts: &mut Parts, state: &AppState) -> Result<AuthUser, AppError> {
    let mut user = AuthUser::from_request_parts(parts, state).await?;
    let stored = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Account no longer exists".into()))
        })?;

    if stored.role != user.role {
        tracing::debug!(
            user_id = user.user_id,
            token_role = %user.role,
            stored_role = %stored.role,
            "Token role is stale, using stored role"
        );
        user.role = stored.role;
    }
    Ok(user)
}
