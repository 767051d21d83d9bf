use backend_test_support::unique_helpers::{unique_email, unique_username};
use blog::db::txn::with_txn;
use blog::repos::posts::Post;
use blog::repos::users::User;
use blog::services::posts::{self as posts_service, PostInput};
use blog::services::users::{self as users_service, NewUser};
use blog::state::app_state::AppState;
use blog::AppError;

use super::auth::token_for;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// A registered user plus a valid token for them.
pub struct SeededUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

impl SeededUser {
    pub fn id(&self) -> i64 {
        self.user.id
    }
}

/// Register a user with unique username/email through the service layer.
pub async fn seed_user(state: &AppState, prefix: &str) -> Result<SeededUser, AppError> {
    let input = NewUser {
        username: unique_username(prefix),
        email: unique_email(prefix),
        password: TEST_PASSWORD.to_string(),
    };

    let user = with_txn(state, move |txn| {
        Box::pin(async move { users_service::register(txn, input).await })
    })
    .await?;

    let token = token_for(user.id, &state.security);
    Ok(SeededUser {
        user,
        password: TEST_PASSWORD.to_string(),
        token,
    })
}

pub async fn seed_post(
    state: &AppState,
    author_id: i64,
    title: &str,
    content: &str,
) -> Result<Post, AppError> {
    let input = PostInput {
        title: title.to_string(),
        content: content.to_string(),
    };

    with_txn(state, move |txn| {
        Box::pin(async move { posts_service::create_post(txn, author_id, input).await })
    })
    .await
}
