//! Post repository. Every read carries the author.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::posts_sea::{self as posts_adapter, PostCreate, PostUpdate, PostWithAuthor};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::users::User;

/// Post domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub date_posted: OffsetDateTime,
    pub author: User,
}

/// Plain post row, used for ownership checks before writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub id: i64,
    pub user_id: i64,
}

fn with_author((post, author): PostWithAuthor) -> Result<Post, DomainError> {
    // FK + cascade guarantee an author; a missing one is a broken row.
    let author = author.ok_or_else(|| {
        DomainError::infra(
            InfraErrorKind::Other("DanglingPost".into()),
            format!("Post {} has no author", post.id),
        )
    })?;

    Ok(Post {
        id: post.id,
        title: post.title,
        content: post.content,
        user_id: post.user_id,
        date_posted: post.date_posted,
        author: User::from(author),
    })
}

pub async fn list_posts<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Post>, DomainError> {
    posts_adapter::list_posts_with_authors(conn)
        .await?
        .into_iter()
        .map(with_author)
        .collect()
}

pub async fn list_posts_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Post>, DomainError> {
    posts_adapter::list_posts_by_user(conn, user_id)
        .await?
        .into_iter()
        .map(with_author)
        .collect()
}

pub async fn find_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<Post>, DomainError> {
    posts_adapter::find_post_with_author(conn, post_id)
        .await?
        .map(with_author)
        .transpose()
}

/// Like `find_post`, but a missing row is `NotFound(Post)`.
pub async fn require_post<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Post, DomainError> {
    find_post(conn, post_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Post, "Post not found"))
}

pub async fn require_post_row<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<PostRow, DomainError> {
    posts_adapter::find_post_by_id(conn, post_id)
        .await?
        .map(|p| PostRow {
            id: p.id,
            user_id: p.user_id,
        })
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Post, "Post not found"))
}

/// Insert and return the stored post with its author.
pub async fn create_post(txn: &DatabaseTransaction, dto: PostCreate) -> Result<Post, DomainError> {
    let created = posts_adapter::create_post(txn, dto).await?;
    require_post(txn, created.id).await
}

pub async fn update_post(txn: &DatabaseTransaction, dto: PostUpdate) -> Result<Post, DomainError> {
    let post_id = dto.id;
    if dto.title.is_some() || dto.content.is_some() {
        posts_adapter::update_post(txn, dto).await?;
    }
    require_post(txn, post_id).await
}

pub async fn delete_post(txn: &DatabaseTransaction, post_id: i64) -> Result<bool, DomainError> {
    Ok(posts_adapter::delete_post(txn, post_id).await? > 0)
}

pub async fn delete_posts_by_user(
    txn: &DatabaseTransaction,
    user_id: i64,
) -> Result<u64, DomainError> {
    Ok(posts_adapter::delete_posts_by_user(txn, user_id).await?)
}
