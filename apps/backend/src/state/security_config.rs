use std::fmt;

use jsonwebtoken::Algorithm;
use time::Duration;

use crate::config::settings::{check_token_expire_minutes, Settings};
use crate::error::AppError;

/// Token signing settings shared read-only by every request.
#[derive(Clone)]
pub struct SecurityConfig {
    /// HMAC key used to sign and verify access tokens
    pub jwt_secret: Vec<u8>,
    /// Pinned signing algorithm (HS256 / HS384 / HS512)
    pub algorithm: Algorithm,
    /// Lifetime applied when `issue` is called without an explicit TTL
    pub access_token_ttl: Duration,
}

impl SecurityConfig {
    /// HS256 with a 30 minute default lifetime.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: Duration::minutes(30),
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_access_token_ttl(mut self, ttl: Duration) -> Self {
        self.access_token_ttl = ttl;
        self
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        if !matches!(
            settings.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::config(format!(
                "unsupported signing algorithm {:?}",
                settings.algorithm
            )));
        }
        // Settings fields are public; re-check here
        check_token_expire_minutes(settings.access_token_expire_minutes)?;
        Ok(Self::new(settings.secret_key.as_bytes())
            .with_algorithm(settings.algorithm)
            .with_access_token_ttl(Duration::minutes(settings.access_token_expire_minutes)))
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .finish()
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
