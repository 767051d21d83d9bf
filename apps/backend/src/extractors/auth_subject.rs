use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::auth::jwt;
use crate::error::AppError;
use crate::extractors::auth_token::bearer_token;
use crate::state::app_state::AppState;

/// Subject of a verified bearer token. Says who is calling, nothing about
/// what they may do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSubject(pub String);

impl AuthSubject {
    pub fn into_inner(self) -> String {
        self.0
    }
}

pub(crate) fn authenticate(req: &HttpRequest) -> Result<AuthSubject, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(AppError::unauthorized_missing_bearer)?;

    let app_state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::internal("AppState not configured"))?;

    jwt::verify(token, &app_state.security)
        .map(AuthSubject)
        .ok_or_else(AppError::unauthorized_invalid_token)
}

impl FromRequest for AuthSubject {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
