//! User repository: domain model plus lookups and writes.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::users_sea::{self as users_adapter, UserCreate, UserUpdate};
use crate::errors::domain::{DomainError, NotFoundKind};

pub const DEFAULT_PROFILE_IMAGE: &str = "/static/profile_pics/default.jpg";

/// User domain model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub image_file: Option<String>,
}

impl User {
    /// Public URL path of the profile picture.
    pub fn image_path(&self) -> String {
        match &self.image_file {
            Some(file) => format!("/media/profile_pics/{file}"),
            None => DEFAULT_PROFILE_IMAGE.to_string(),
        }
    }
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, user_id).await?;
    Ok(user.map(User::from))
}

/// Like `find_user_by_id`, but a missing row is `NotFound(User)`.
pub async fn require_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<User, DomainError> {
    find_user_by_id(conn, user_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::User, "User not found"))
}

/// Resolve a login identifier: exact username, or email compared lower-cased.
pub async fn find_user_by_login<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
) -> Result<Option<User>, DomainError> {
    let email = login.trim().to_lowercase();
    let user = users_adapter::find_user_by_login(conn, login, &email).await?;
    Ok(user.map(User::from))
}

pub async fn create_user(txn: &DatabaseTransaction, dto: UserCreate) -> Result<User, DomainError> {
    let user = users_adapter::create_user(txn, dto).await?;
    Ok(User::from(user))
}

/// Apply a partial update; an empty update just reloads the row.
pub async fn update_user(txn: &DatabaseTransaction, dto: UserUpdate) -> Result<User, DomainError> {
    if dto.is_empty() {
        return require_user(txn, dto.id).await;
    }
    let user = users_adapter::update_user(txn, dto).await?;
    Ok(User::from(user))
}

/// Returns whether a row was deleted.
pub async fn delete_user(txn: &DatabaseTransaction, user_id: i64) -> Result<bool, DomainError> {
    Ok(users_adapter::delete_user(txn, user_id).await? > 0)
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            image_file: model.image_file,
        }
    }
}
