//! Startup tasks that run before the server accepts requests.

use eventhub_core::accounts::normalize_email;
use eventhub_core::roles::Role;
use eventhub_db::models::user::User;
use eventhub_db::repositories::UserRepo;
use sqlx::PgPool;

/// Promote the account registered under `email` to admin.
///
/// Returns the account if it exists. A missing account is logged and left
/// for a later start, since the admin may not have signed up yet.
pub async fn promote_admin(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
    let email = normalize_email(email);
    let Some(user) = UserRepo::find_by_email(pool, &email).await? else {
        tracing::warn!(%email, "ADMIN_EMAIL does not match any account yet");
        return Ok(None);
    };

    if user.role == Role::Admin {
        return Ok(Some(user));
    }

    let promoted = UserRepo::set_role(pool, user.id, Role::Admin).await?;
    tracing::info!(user_id = user.id, %email, "Promoted ADMIN_EMAIL account to admin");
    Ok(promoted)
}
