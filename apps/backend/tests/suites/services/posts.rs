use blog::db::require_db;
use blog::db::txn::with_txn;
use blog::errors::ErrorCode;
use blog::repos::posts as posts_repo;
use blog::services::posts::{self as posts_service, PostPatch};

use crate::support::build_test_state;
use crate::support::factory::{seed_post, seed_user};

#[tokio::test]
async fn create_stamps_author_and_date() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;

    let before = time::OffsetDateTime::now_utc();
    let post = seed_post(&state, alice.id(), "Title", "Body").await?;

    assert_eq!(post.user_id, alice.id());
    assert_eq!(post.author.id, alice.id());
    assert_eq!(post.author.username, alice.user.username);
    assert!(post.date_posted >= before - time::Duration::seconds(1));
    Ok(())
}

#[tokio::test]
async fn empty_patch_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let post = seed_post(&state, alice.id(), "Keep", "Me").await?;
    let (alice_id, post_id) = (alice.id(), post.id);

    let patched = with_txn(&state, move |txn| {
        Box::pin(async move {
            posts_service::patch_post(txn, alice_id, post_id, PostPatch::default()).await
        })
    })
    .await?;

    assert_eq!(patched, post);
    Ok(())
}

#[tokio::test]
async fn non_author_cannot_delete() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    let post = seed_post(&state, alice.id(), "Alice's", "post").await?;
    let (bob_id, post_id) = (bob.id(), post.id);

    let err = with_txn(&state, move |txn| {
        Box::pin(async move { posts_service::delete_post(txn, bob_id, post_id).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let db = require_db(&state)?;
    assert!(posts_repo::find_post(db, post_id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn invalid_patch_is_rejected_after_ownership() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let bob = seed_user(&state, "bob").await?;
    let post = seed_post(&state, alice.id(), "Original", "post").await?;
    let (alice_id, bob_id, post_id) = (alice.id(), bob.id(), post.id);

    // a stranger learns only that they may not edit
    let err = with_txn(&state, move |txn| {
        let patch = PostPatch {
            title: Some(String::new()),
            content: None,
        };
        Box::pin(async move { posts_service::patch_post(txn, bob_id, post_id, patch).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::Forbidden);

    let err = with_txn(&state, move |txn| {
        let patch = PostPatch {
            title: Some(String::new()),
            content: None,
        };
        Box::pin(async move { posts_service::patch_post(txn, alice_id, post_id, patch).await })
    })
    .await
    .unwrap_err();
    assert_eq!(err.code(), ErrorCode::ValidationError);
    Ok(())
}
