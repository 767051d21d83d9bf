//! Post writes with author-only ownership checks.

use sea_orm::DatabaseTransaction;
use tracing::info;

use crate::adapters::posts_sea::{PostCreate, PostUpdate};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::logging::security;
use crate::repos::posts::{self as posts_repo, Post};

pub const TITLE_MAX_LEN: usize = 100;

/// Title and content, as sent on create and full replace.
#[derive(Debug, Clone)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

pub fn validate_title(title: &str) -> Result<(), DomainError> {
    let len = title.chars().count();
    if len == 0 || len > TITLE_MAX_LEN {
        return Err(DomainError::validation(format!(
            "title must be between 1 and {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

pub fn validate_content(content: &str) -> Result<(), DomainError> {
    if content.is_empty() {
        return Err(DomainError::validation("content must not be empty"));
    }
    Ok(())
}

pub async fn create_post(
    txn: &DatabaseTransaction,
    author_id: i64,
    input: PostInput,
) -> Result<Post, AppError> {
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    let post =
        posts_repo::create_post(txn, PostCreate::new(author_id, input.title, input.content))
            .await?;
    info!(post_id = post.id, user_id = author_id, "post created");
    Ok(post)
}

async fn ensure_author(
    txn: &DatabaseTransaction,
    caller_id: i64,
    post_id: i64,
) -> Result<(), AppError> {
    let row = posts_repo::require_post_row(txn, post_id).await?;
    if row.user_id != caller_id {
        security::ownership_denied(caller_id, "post", post_id);
        return Err(DomainError::forbidden("Not authorized to modify this post").into());
    }
    Ok(())
}

/// Full replace of title and content.
pub async fn replace_post(
    txn: &DatabaseTransaction,
    caller_id: i64,
    post_id: i64,
    input: PostInput,
) -> Result<Post, AppError> {
    ensure_author(txn, caller_id, post_id).await?;
    validate_title(&input.title)?;
    validate_content(&input.content)?;

    let update = PostUpdate::new(post_id)
        .with_title(input.title)
        .with_content(input.content);
    Ok(posts_repo::update_post(txn, update).await?)
}

pub async fn patch_post(
    txn: &DatabaseTransaction,
    caller_id: i64,
    post_id: i64,
    patch: PostPatch,
) -> Result<Post, AppError> {
    ensure_author(txn, caller_id, post_id).await?;

    let mut update = PostUpdate::new(post_id);
    if let Some(title) = patch.title {
        validate_title(&title)?;
        update = update.with_title(title);
    }
    if let Some(content) = patch.content {
        validate_content(&content)?;
        update = update.with_content(content);
    }
    Ok(posts_repo::update_post(txn, update).await?)
}

pub async fn delete_post(
    txn: &DatabaseTransaction,
    caller_id: i64,
    post_id: i64,
) -> Result<(), AppError> {
    ensure_author(txn, caller_id, post_id).await?;
    posts_repo::delete_post(txn, post_id).await?;
    info!(post_id, user_id = caller_id, "post deleted");
    Ok(())
}
