//! Registration, login and self-service account changes.

use std::sync::LazyLock;

use regex::Regex;
use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::adapters::users_sea::{UserCreate, UserUpdate};
use crate::auth::password::{
    hash_password, verify_password, verify_without_account, MIN_PASSWORD_LEN,
};
use crate::error::AppError;
use crate::errors::domain::DomainError;
use crate::logging::pii::Redacted;
use crate::logging::security;
use crate::repos::posts as posts_repo;
use crate::repos::users::{self as users_repo, User};

pub const USERNAME_MAX_LEN: usize = 50;
pub const EMAIL_MAX_LEN: usize = 120;
pub const IMAGE_FILE_MAX_LEN: usize = 200;

#[allow(clippy::unwrap_used)]
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Registration input.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Partial account update; `image_file: Some(None)` clears the picture.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub image_file: Option<Option<String>>,
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn validate_username(username: &str) -> Result<(), DomainError> {
    let len = char_len(username);
    if len == 0 || len > USERNAME_MAX_LEN {
        return Err(DomainError::validation(format!(
            "username must be between 1 and {USERNAME_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Lower-cased, trimmed email, or a validation error.
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let email = email.trim().to_lowercase();
    if char_len(&email) > EMAIL_MAX_LEN {
        return Err(DomainError::validation(format!(
            "email must be at most {EMAIL_MAX_LEN} characters"
        )));
    }
    if !EMAIL_SHAPE.is_match(&email) {
        return Err(DomainError::validation("email is not a valid address"));
    }
    Ok(email)
}

pub fn validate_password(password: &str) -> Result<(), DomainError> {
    if char_len(password) < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

fn validate_image_file(image_file: &str) -> Result<(), DomainError> {
    let len = char_len(image_file);
    if len == 0 || len > IMAGE_FILE_MAX_LEN {
        return Err(DomainError::validation(format!(
            "image_file must be between 1 and {IMAGE_FILE_MAX_LEN} characters"
        )));
    }
    if image_file.contains('/') || image_file.contains('\\') || image_file.contains("..") {
        return Err(DomainError::validation("image_file must be a bare file name"));
    }
    Ok(())
}

pub async fn register(txn: &DatabaseTransaction, input: NewUser) -> Result<User, AppError> {
    validate_username(&input.username)?;
    let email = normalize_email(&input.email)?;
    validate_password(&input.password)?;

    let password_hash = hash_password(&input.password)?;
    let user = users_repo::create_user(
        txn,
        UserCreate::new(input.username, email, password_hash),
    )
    .await?;

    info!(user_id = user.id, email = %Redacted(&user.email), "user registered");
    Ok(user)
}

/// Check a username-or-email / password pair.
///
/// Unknown user and wrong password are indistinguishable to the caller.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    login: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = users_repo::find_user_by_login(conn, login).await? else {
        verify_without_account(password);
        security::login_failed("unknown_user", login);
        return Err(AppError::invalid_credentials());
    };

    if !verify_password(password, &user.password_hash) {
        security::login_failed("bad_password", login);
        return Err(AppError::invalid_credentials());
    }

    debug!(user_id = user.id, "login succeeded");
    Ok(user)
}

fn ensure_self(caller_id: i64, target_id: i64) -> Result<(), DomainError> {
    if caller_id != target_id {
        security::ownership_denied(caller_id, "user", target_id);
        return Err(DomainError::forbidden("Not authorized to modify this user"));
    }
    Ok(())
}

pub async fn update_user(
    txn: &DatabaseTransaction,
    caller_id: i64,
    target_id: i64,
    patch: UserPatch,
) -> Result<User, AppError> {
    users_repo::require_user(txn, target_id).await?;
    ensure_self(caller_id, target_id)?;

    let mut update = UserUpdate::new(target_id);
    if let Some(username) = patch.username {
        validate_username(&username)?;
        update = update.with_username(username);
    }
    if let Some(email) = patch.email {
        update = update.with_email(normalize_email(&email)?);
    }
    if let Some(image_file) = patch.image_file {
        if let Some(file) = &image_file {
            validate_image_file(file)?;
        }
        update = update.with_image_file(image_file);
    }

    let user = users_repo::update_user(txn, update).await?;
    info!(user_id = user.id, "user updated");
    Ok(user)
}

/// Delete the caller's account together with their posts.
pub async fn delete_user(
    txn: &DatabaseTransaction,
    caller_id: i64,
    target_id: i64,
) -> Result<(), AppError> {
    users_repo::require_user(txn, target_id).await?;
    ensure_self(caller_id, target_id)?;

    let removed_posts = posts_repo::delete_posts_by_user(txn, target_id).await?;
    users_repo::delete_user(txn, target_id).await?;

    info!(user_id = target_id, removed_posts, "user deleted");
    Ok(())
}
