//! Handlers for the caller's own profile (`/users/me`).

use axum::extract::State;
use axum::Json;
use eventhub_core::accounts::normalized;
use eventhub_core::error::CoreError;
use eventhub_db::models::user::{UpdateUser, UserResponse};
use eventhub_db::repositories::UserRepo;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `PUT /users/me`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "normalized::optional_username")]
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "normalized::optional_email")]
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub profile_picture_url: Option<String>,
    /// Required when `new_password` is set.
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// GET /api/v1/users/me
pub async fn get_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        })?;
    Ok(ApiResponse::ok("Profile retrieved", UserResponse::from(user)))
}

/// PUT /api/v1/users/me
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<UserResponse>>> {
    let user_id = auth_user.user_id;
    let not_found = || CoreError::NotFound {
        entity: "User",
        id: user_id,
    };
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(not_found)?;

    let password_hash = match input.new_password.as_deref() {
        None => None,
        Some(new_password) => {
            let current = input.current_password.as_deref().ok_or_else(|| {
                CoreError::Validation(
                    "current_password: required to set a new password".to_string(),
                )
            })?;
            let matches = verify_password(current, &user.password_hash).map_err(|e| {
                AppError::InternalError(format!("Password verification error: {e}"))
            })?;
            if !matches {
                return Err(CoreError::Validation(
                    "current_password: does not match".to_string(),
                )
                .into());
            }
            validate_password_strength(new_password, state.config.password_min_length)?;
            Some(hash_password(new_password).map_err(|e| {
                AppError::InternalError(format!("Password hashing error: {e}"))
            })?)
        }
    };

    let patch = UpdateUser {
        username: input.username,
        email: input.email,
        password_hash,
        profile_picture_url: input.profile_picture_url,
    };

    let updated = UserRepo::update(&state.pool, auth_user.user_id, &patch)
        .await?
        .ok_or_else(not_found)?;

    tracing::info!(user_id = updated.id, "Profile updated");
    Ok(ApiResponse::ok("Profile updated", UserResponse::from(updated)))
}
