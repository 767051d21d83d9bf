//! Error codes for the blog API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Token failed verification (signature, encoding, claims or expiry)
    UnauthorizedInvalidToken,
    /// Login with unknown user or wrong password
    InvalidCredentials,
    /// Authenticated but not allowed to touch the resource
    Forbidden,

    // Request Validation
    /// Field-level validation failure
    ValidationError,
    /// Unparseable request body or form
    BadRequest,

    // Resource Not Found
    UserNotFound,
    PostNotFound,
    /// Unknown route or generic missing resource
    NotFound,

    // Conflicts
    UniqueUsername,
    UniqueEmail,
    /// Generic conflict (fallback for unmatched constraint violations)
    Conflict,

    // System Errors
    DbError,
    DbUnavailable,
    DbTimeout,
    Internal,
    ConfigError,
}

impl ErrorCode {
    /// The canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidToken => "UNAUTHORIZED_INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",

            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::UniqueUsername => "UNIQUE_USERNAME",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
