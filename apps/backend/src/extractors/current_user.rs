use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use tracing::debug;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::auth_subject::authenticate;
use crate::repos::users::{self as users_repo, User};
use crate::state::app_state::AppState;

/// The caller's user row, resolved from the token subject.
///
/// A subject that is not a user id, or names a user that no longer exists,
/// is an invalid token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn id(&self) -> i64 {
        self.0.id
    }

    pub fn into_inner(self) -> User {
        self.0
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let subject = authenticate(req);
        let app_state = req.app_data::<web::Data<AppState>>().cloned();

        Box::pin(async move {
            let subject = subject?;
            let app_state =
                app_state.ok_or_else(|| AppError::internal("AppState not configured"))?;

            let Ok(user_id) = subject.0.parse::<i64>() else {
                debug!(reason = "non_numeric_subject", "token rejected");
                return Err(AppError::unauthorized_invalid_token());
            };

            let db = require_db(&app_state)?;
            match users_repo::find_user_by_id(db, user_id).await? {
                Some(user) => Ok(CurrentUser(user)),
                None => {
                    debug!(user_id, reason = "unknown_user", "token rejected");
                    Err(AppError::unauthorized_invalid_token())
                }
            }
        })
    }
}
