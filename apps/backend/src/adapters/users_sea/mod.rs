//! SeaORM adapter for the users table.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait,
    NotSet, QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::{UserCreate, UserUpdate};

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(user_id).one(conn).await
}

/// First user whose username equals `username` or whose email equals `email`.
pub async fn find_user_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
    email: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(
            Condition::any()
                .add(users::Column::Username.eq(username))
                .add(users::Column::Email.eq(email)),
        )
        .one(conn)
        .await
}

pub async fn create_user(
    txn: &DatabaseTransaction,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        image_file: Set(dto.image_file),
    };

    user_active.insert(txn).await
}

pub async fn update_user(
    txn: &DatabaseTransaction,
    dto: UserUpdate,
) -> Result<users::Model, sea_orm::DbErr> {
    let user_active = users::ActiveModel {
        id: Set(dto.id),
        username: dto.username.map_or(NotSet, Set),
        email: dto.email.map_or(NotSet, Set),
        password_hash: NotSet,
        image_file: dto.image_file.map_or(NotSet, Set),
    };

    user_active.update(txn).await
}

pub async fn delete_user(txn: &DatabaseTransaction, user_id: i64) -> Result<u64, sea_orm::DbErr> {
    let res = users::Entity::delete_by_id(user_id).exec(txn).await?;
    Ok(res.rows_affected)
}
