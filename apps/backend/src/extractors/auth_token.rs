use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Raw bearer token taken verbatim from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    pub token: String,
}

const SCHEME: &str = "bearer";

/// Token from the `Authorization` header, or `None` when the header is
/// absent, not visible ASCII, uses another scheme, or carries no token.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    // "<scheme> <token>": scheme is case-insensitive, exactly one space
    let (scheme, token) = value.split_at_checked(SCHEME.len())?;
    if !scheme.eq_ignore_ascii_case(SCHEME) {
        return None;
    }
    let token = token.strip_prefix(' ')?;
    if token.is_empty() || token.starts_with(' ') {
        return None;
    }
    Some(token)
}

impl FromRequest for AuthToken {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            bearer_token(req.headers())
                .map(|token| AuthToken {
                    token: token.to_string(),
                })
                .ok_or_else(AppError::unauthorized_missing_bearer),
        )
    }
}
