use blog::auth::password::verify_password;
use blog::db::require_db;
use blog::db::txn::with_txn;
use blog::errors::ErrorCode;
use blog::repos::posts as posts_repo;
use blog::repos::users as users_repo;
use blog::services::users::{self as users_service, NewUser, UserPatch};

use crate::support::build_test_state;
use crate::support::factory::{seed_post, seed_user, TEST_PASSWORD};

#[tokio::test]
async fn register_stores_a_hash_and_normalized_email() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let input = NewUser {
        username: "grace".into(),
        email: "  Grace@Navy.MIL ".into(),
        password: "cobol-rocks".into(),
    };

    let user = with_txn(&state, move |txn| {
        Box::pin(async move { users_service::register(txn, input).await })
    })
    .await?;

    assert_eq!(user.email, "grace@navy.mil");
    assert_ne!(user.password_hash, "cobol-rocks");
    assert!(user.password_hash.starts_with("$argon2"));
    assert!(verify_password("cobol-rocks", &user.password_hash));
    Ok(())
}

#[tokio::test]
async fn authenticate_by_username_or_email() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let db = require_db(&state)?;

    let by_name = users_service::authenticate(db, &alice.user.username, TEST_PASSWORD).await?;
    let by_email = users_service::authenticate(db, &alice.user.email, TEST_PASSWORD).await?;
    assert_eq!(by_name.id, alice.id());
    assert_eq!(by_email.id, alice.id());

    let err = users_service::authenticate(db, &alice.user.username, "wrong-password")
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);

    let err = users_service::authenticate(db, "ghost", TEST_PASSWORD)
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidCredentials);
    Ok(())
}

#[tokio::test]
async fn invalid_update_writes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let alice_id = alice.id();

    // valid username, invalid email: nothing may be written
    let patch = UserPatch {
        username: Some("renamed".into()),
        email: Some("broken".into()),
        image_file: None,
    };
    let err = with_txn(&state, move |txn| {
        Box::pin(async move { users_service::update_user(txn, alice_id, alice_id, patch).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);

    let db = require_db(&state)?;
    let reloaded = users_repo::require_user(db, alice_id).await?;
    assert_eq!(reloaded.username, alice.user.username);
    Ok(())
}

#[tokio::test]
async fn missing_target_is_not_found_before_forbidden() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let alice_id = alice.id();

    let err = with_txn(&state, move |txn| {
        Box::pin(async move { users_service::delete_user(txn, alice_id, 777_777).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::UserNotFound);
    Ok(())
}

#[tokio::test]
async fn delete_user_cascades_to_posts_only_for_that_user(
) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    seed_post(&state, alice.id(), "a1", "x").await?;
    seed_post(&state, alice.id(), "a2", "x").await?;
    seed_post(&state, bob.id(), "b1", "x").await?;
    let alice_id = alice.id();

    with_txn(&state, move |txn| {
        Box::pin(async move { users_service::delete_user(txn, alice_id, alice_id).await })
    })
    .await?;

    let db = require_db(&state)?;
    assert!(users_repo::find_user_by_id(db, alice_id).await?.is_none());
    let remaining = posts_repo::list_posts(db).await?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].user_id, bob.id());
    Ok(())
}
