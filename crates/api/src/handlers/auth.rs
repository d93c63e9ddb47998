//! Handlers for the `/auth` resource (signup, login, refresh, logout).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use eventhub_core::accounts::{normalize_email, normalized, signup_role};
use eventhub_core::error::CoreError;
use eventhub_db::models::session::CreateSession;
use eventhub_db::models::user::{CreateUser, User, UserResponse};
use eventhub_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[serde(deserialize_with = "normalized::username")]
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[serde(deserialize_with = "normalized::email")]
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Only `attendee` (or nothing) is accepted here.
    pub role: Option<String>,
}

/// Request body for `POST /auth/login`. `login` is a username or an email.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(alias = "email", alias = "username")]
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Tokens plus the account they belong to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub revoked_sessions: u64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register an attendee account and sign it in.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AuthResponse>>)> {
    let role = signup_role(input.role.as_deref())?;
    validate_password_strength(&input.password, state.config.password_min_length)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "User registered");

    let response = create_auth_response(&state, user).await?;
    Ok(ApiResponse::created("User registered successfully", response))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    // Usernames and emails share the same normalization.
    let user = UserRepo::find_by_login(&state.pool, &normalize_email(&input.login))
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::info!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    let response = create_auth_response(&state, user).await?;
    Ok(ApiResponse::ok("Login successful", response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a live refresh token for a new token pair. The old session is
/// revoked.
pub async fn refresh(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AuthResponse>>> {
    let token_hash = hash_refresh_token(&input.refresh_token);

    let session = SessionRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid or expired refresh token".into(),
            ))
        })?;

    // A concurrent refresh with the same token loses here.
    if !SessionRepo::revoke(&state.pool, session.id).await? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    let response = create_auth_response(&state, user).await?;
    Ok(ApiResponse::ok("Token refreshed", response))
}

/// POST /api/v1/auth/logout
///
/// Revoke every session of the caller. Outstanding access tokens stay valid
/// until they expire.
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<LogoutResponse>>> {
    let revoked_sessions = SessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked_sessions, "User logged out");
    Ok(ApiResponse::ok(
        "Logged out",
        LogoutResponse { revoked_sessions },
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue a token pair, persist the refresh session, and build the response.
async fn create_auth_response(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, user.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: refresh_hash,
            expires_at: Utc::now() + chrono::Duration::days(jwt.refresh_token_expiry_days),
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserResponse::from(user),
    })
}
