use blog::db::require_db;
use blog::db::txn::with_txn;
use blog::errors::ErrorCode;
use blog::repos::posts as posts_repo;
use blog::services::posts::{self as posts_service, PostInput};
use blog::AppError;

use crate::support::build_test_state;
use crate::support::factory::seed_user;
use crate::support::test_state::build_state_without_db;

#[tokio::test]
async fn ok_commits() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let alice_id = alice.id();

    let post = with_txn(&state, move |txn| {
        Box::pin(async move {
            posts_service::create_post(
                txn,
                alice_id,
                PostInput {
                    title: "kept".into(),
                    content: "committed".into(),
                },
            )
            .await
        })
    })
    .await?;

    let db = require_db(&state)?;
    assert!(posts_repo::find_post(db, post.id).await?.is_some());
    Ok(())
}

#[tokio::test]
async fn err_rolls_back_and_keeps_the_error() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let alice = seed_user(&state, "alice").await?;
    let alice_id = alice.id();

    let err = with_txn(&state, move |txn| {
        Box::pin(async move {
            posts_service::create_post(
                txn,
                alice_id,
                PostInput {
                    title: "discarded".into(),
                    content: "rolled back".into(),
                },
            )
            .await?;
            Err::<(), AppError>(AppError::invalid("abort after write"))
        })
    })
    .await
    .unwrap_err();
    assert_eq!(err.detail(), "abort after write");

    let db = require_db(&state)?;
    assert!(posts_repo::list_posts(db).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn without_db_is_unavailable() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state_without_db().await?;

    let err = with_txn(&state, |_txn| Box::pin(async { Ok::<_, AppError>(()) }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::DbUnavailable);
    Ok(())
}
