//! Integration tests for accounts and refresh-token sessions.

mod common;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use common::create_user;
use eventhub_core::roles::Role;
use eventhub_db::models::session::CreateSession;
use eventhub_db::models::user::{CreateUser, UpdateUser};
use eventhub_db::repositories::{SessionRepo, UserRepo};
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_hits_named_constraint(pool: PgPool) {
    create_user(&pool, "first", Role::Attendee).await;

    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: "second".to_string(),
            email: "first@test.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::Attendee,
        },
    )
    .await
    .unwrap_err();

    assert_matches!(err, sqlx::Error::Database(db) if db.constraint() == Some("uq_users_email"));
}

#[sqlx::test(migrations = "./migrations")]
async fn short_username_violates_check_constraint(pool: PgPool) {
    let err = UserRepo::create(
        &pool,
        &CreateUser {
            username: String::new(),
            email: "empty@test.com".to_string(),
            password_hash: "x".to_string(),
            role: Role::Attendee,
        },
    )
    .await
    .unwrap_err();

    assert_matches!(
        err,
        sqlx::Error::Database(db) if db.constraint() == Some("ck_users_username_length")
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn login_lookup_matches_username_or_email(pool: PgPool) {
    let user = create_user(&pool, "carol", Role::Attendee).await;

    let by_name = UserRepo::find_by_login(&pool, "carol").await.unwrap().unwrap();
    let by_email = UserRepo::find_by_login(&pool, "carol@test.com").await.unwrap().unwrap();
    assert_eq!(by_name.id, user.id);
    assert_eq!(by_email.id, user.id);
    assert!(UserRepo::find_by_login(&pool, "dave").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn profile_update_is_partial_and_role_is_separate(pool: PgPool) {
    let user = create_user(&pool, "erin", Role::Attendee).await;

    let updated = UserRepo::update(
        &pool,
        user.id,
        &UpdateUser {
            profile_picture_url: Some("https://img.test/erin.png".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .unwrap();
    assert_eq!(updated.username, "erin");
    assert_eq!(updated.password_hash, user.password_hash);
    assert_eq!(updated.profile_picture_url.as_deref(), Some("https://img.test/erin.png"));
    assert_eq!(updated.role, Role::Attendee);

    let promoted = UserRepo::set_role(&pool, user.id, Role::Organizer).await.unwrap().unwrap();
    assert_eq!(promoted.role, Role::Organizer);
    assert!(UserRepo::set_role(&pool, 9_999, Role::Admin).await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn sessions_are_single_use_and_expire(pool: PgPool) {
    let user = create_user(&pool, "frank", Role::Attendee).await;
    let live = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "live-hash".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "expired-hash".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_active_by_hash(&pool, "live-hash").await.unwrap().unwrap();
    assert_eq!(found.id, live.id);
    assert!(SessionRepo::find_active_by_hash(&pool, "expired-hash").await.unwrap().is_none());

    assert!(SessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, live.id).await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "live-hash").await.unwrap().is_none());

    // Only the expired session is still unrevoked.
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 1);
}
