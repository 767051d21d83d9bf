//! Access token codec: signed, self-expiring JWS tokens.
//!
//! `issue` stamps `exp` and signs; `verify` returns the subject or `None`.
//! Verification failures are indistinguishable to callers.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Claims supplied by the caller at issuance.
///
/// `sub` identifies the user; `extra` carries any additional claims. A
/// caller-supplied `exp` (or duplicate `sub`) in `extra` is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Claims {
    pub sub: String,
    pub extra: Map<String, Value>,
}

impl Claims {
    pub fn for_subject(sub: impl Into<String>) -> Self {
        Self {
            sub: sub.into(),
            extra: Map::new(),
        }
    }

    pub fn with_claim(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

#[derive(Serialize)]
struct SignedClaims<'a> {
    sub: &'a str,
    exp: i64,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Deserialize)]
struct VerifiedClaims {
    sub: String,
    exp: i64,
}

/// Sign `claims` with `exp = now + ttl` (default TTL from `security`).
pub fn issue(
    claims: &Claims,
    ttl: Option<Duration>,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    issue_at(claims, ttl, OffsetDateTime::now_utc(), security)
}

/// `issue` with an explicit clock.
pub fn issue_at(
    claims: &Claims,
    ttl: Option<Duration>,
    now: OffsetDateTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    if claims.sub.is_empty() {
        return Err(AppError::internal(
            "Refusing to issue a token without a subject",
        ));
    }

    let ttl = ttl.unwrap_or(security.access_token_ttl);
    let exp = now
        .unix_timestamp()
        .checked_add(ttl.whole_seconds())
        .ok_or_else(|| AppError::internal("Token lifetime overflows the expiry timestamp"))?;

    let mut extra = claims.extra.clone();
    extra.remove("exp");
    extra.remove("sub");

    let signed = SignedClaims {
        sub: &claims.sub,
        exp,
        extra,
    };

    encode(
        &Header::new(security.algorithm),
        &signed,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode token: {e}")))
}

/// Subject of a valid token, `None` for anything else.
pub fn verify(token: &str, security: &SecurityConfig) -> Option<String> {
    verify_at(token, OffsetDateTime::now_utc(), security)
}

/// `verify` with an explicit clock. A token is valid while `exp > now`.
pub fn verify_at(token: &str, now: OffsetDateTime, security: &SecurityConfig) -> Option<String> {
    let mut validation = Validation::new(security.algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);
    // expiry is checked below against `now` with zero leeway
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.leeway = 0;

    let claims = match decode::<VerifiedClaims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(e) => {
            debug!(reason = ?e.kind(), "token rejected");
            return None;
        }
    };

    if claims.sub.is_empty() {
        debug!(reason = "empty_subject", "token rejected");
        return None;
    }

    if claims.exp <= now.unix_timestamp() {
        debug!(reason = "expired", exp = claims.exp, "token rejected");
        return None;
    }

    Some(claims.sub)
}
