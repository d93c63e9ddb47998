//! Admin-only account management.

use axum::extract::State;
use axum::Json;
use eventhub_core::error::CoreError;
use eventhub_core::roles::Role;
use eventhub_core::types::DbId;
use eventhub_db::models::user::UserResponse;
use eventhub_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{PathParam, ValidatedJson};
use crate::middleware::rbac::RequireAdmin;
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SetRoleRequest {
    pub role: Role,
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Organizer and admin routes read the stored role, so the change applies to
/// the user's next request. Other routes see it once a new token is issued.
pub async fn set_user_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    PathParam(id): PathParam<DbId>,
    ValidatedJson(input): ValidatedJson<SetRoleRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::set_role(&state.pool, id, input.role)
        .await?
        .ok_or(CoreError::NotFound { entity: "User", id })?;

    tracing::info!(
        admin_id = admin.user_id,
        user_id = user.id,
        role = %user.role,
        "User role changed"
    );
    Ok(ApiResponse::ok("Role updated", UserResponse::from(user)))
}
