//! SeaORM adapter for the posts table. Reads join the author row.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{posts, users};

pub mod dto;

pub use dto::{PostCreate, PostUpdate};

pub type PostWithAuthor = (posts::Model, Option<users::Model>);

/// Every post with its author, newest first.
pub async fn list_posts_with_authors<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<PostWithAuthor>, sea_orm::DbErr> {
    posts::Entity::find()
        .find_also_related(users::Entity)
        .order_by_desc(posts::Column::DatePosted)
        .order_by_desc(posts::Column::Id)
        .all(conn)
        .await
}

/// Posts written by `user_id`, newest first.
pub async fn list_posts_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<PostWithAuthor>, sea_orm::DbErr> {
    posts::Entity::find()
        .filter(posts::Column::UserId.eq(user_id))
        .find_also_related(users::Entity)
        .order_by_desc(posts::Column::DatePosted)
        .order_by_desc(posts::Column::Id)
        .all(conn)
        .await
}

pub async fn find_post_with_author<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<PostWithAuthor>, sea_orm::DbErr> {
    posts::Entity::find_by_id(post_id)
        .find_also_related(users::Entity)
        .one(conn)
        .await
}

pub async fn find_post_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    post_id: i64,
) -> Result<Option<posts::Model>, sea_orm::DbErr> {
    posts::Entity::find_by_id(post_id).one(conn).await
}

pub async fn create_post(
    txn: &DatabaseTransaction,
    dto: PostCreate,
) -> Result<posts::Model, sea_orm::DbErr> {
    let post_active = posts::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        content: Set(dto.content),
        user_id: Set(dto.user_id),
        date_posted: Set(dto.date_posted),
    };

    post_active.insert(txn).await
}

pub async fn update_post(
    txn: &DatabaseTransaction,
    dto: PostUpdate,
) -> Result<posts::Model, sea_orm::DbErr> {
    let post_active = posts::ActiveModel {
        id: Set(dto.id),
        title: dto.title.map_or(NotSet, Set),
        content: dto.content.map_or(NotSet, Set),
        user_id: NotSet,
        date_posted: NotSet,
    };

    post_active.update(txn).await
}

pub async fn delete_post(txn: &DatabaseTransaction, post_id: i64) -> Result<u64, sea_orm::DbErr> {
    let res = posts::Entity::delete_by_id(post_id).exec(txn).await?;
    Ok(res.rows_affected)
}

pub async fn delete_posts_by_user(
    txn: &DatabaseTransaction,
    user_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = posts::Entity::delete_many()
        .filter(posts::Column::UserId.eq(user_id))
        .exec(txn)
        .await?;
    Ok(res.rows_affected)
}
