use std::env;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://blog.db?mode=rwc";
pub const DEFAULT_SECRET_KEY: &str = "my-secret-key-2026";
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
/// One year.
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 525_600;

/// Process settings read once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    pub debug: bool,
    pub database_url: String,
    pub secret_key: String,
    pub algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub host: String,
    pub port: u16,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("debug", &self.debug)
            .field("database_url", &self.database_url)
            .field("secret_key", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field(
                "access_token_expire_minutes",
                &self.access_token_expire_minutes,
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`, applying defaults for unset names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let debug = match lookup("DEBUG") {
            Some(raw) => parse_bool("DEBUG", &raw)?,
            None => true,
        };

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let secret_key = lookup("SECRET_KEY").unwrap_or_else(|| DEFAULT_SECRET_KEY.to_string());
        if secret_key.is_empty() {
            return Err(AppError::config("SECRET_KEY must not be empty"));
        }

        let algorithm = match lookup("ALGORITHM") {
            Some(raw) => parse_algorithm(&raw)?,
            None => Algorithm::HS256,
        };

        let access_token_expire_minutes = match lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                AppError::config(format!(
                    "ACCESS_TOKEN_EXPIRE_MINUTES must be an integer, got '{raw}'"
                ))
            })?,
            None => DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
        };
        check_token_expire_minutes(access_token_expire_minutes)?;

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| {
                AppError::config(format!("PORT must be a valid port number, got '{raw}'"))
            })?,
            None => 8000,
        };

        Ok(Self {
            debug,
            database_url,
            secret_key,
            algorithm,
            access_token_expire_minutes,
            host,
            port,
        })
    }

    pub fn uses_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_SECRET_KEY
    }
}

/// Token lifetime must be positive and at most `MAX_ACCESS_TOKEN_EXPIRE_MINUTES`.
pub fn check_token_expire_minutes(minutes: i64) -> Result<(), AppError> {
    if minutes <= 0 {
        return Err(AppError::config(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be greater than zero",
        ));
    }
    if minutes > MAX_ACCESS_TOKEN_EXPIRE_MINUTES {
        return Err(AppError::config(format!(
            "ACCESS_TOKEN_EXPIRE_MINUTES must be at most {MAX_ACCESS_TOKEN_EXPIRE_MINUTES}, got {minutes}"
        )));
    }
    Ok(())
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config(format!(
            "{name} must be a boolean, got '{raw}'"
        ))),
    }
}

/// Only HMAC algorithms are accepted; the key is a shared secret.
pub fn parse_algorithm(raw: &str) -> Result<Algorithm, AppError> {
    match raw.trim() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::config(format!(
            "ALGORITHM must be one of HS256, HS384, HS512, got '{other}'"
        ))),
    }
}
