//! SeaORM -> DomainError translation.
//!
//! Adapters and repos surface `sea_orm::DbErr`; services convert it here so
//! higher layers only see `DomainError` (and then `AppError` via `From`).

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

const SQLITE_UNIQUE_PREFIX: &str = "UNIQUE constraint failed: ";

/// `table.column` from SQLite's "UNIQUE constraint failed: table.column".
fn unique_violation_target(error_msg: &str) -> Option<&str> {
    let start = error_msg.find(SQLITE_UNIQUE_PREFIX)? + SQLITE_UNIQUE_PREFIX.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == ',' || c == '"' || c == ')')
        .next()
        .filter(|s| !s.is_empty())
}

fn conflict_for_target(target: &str) -> Option<(ConflictKind, &'static str)> {
    match target {
        "users.username" => Some((ConflictKind::UniqueUsername, "Username already taken")),
        "users.email" => Some((ConflictKind::UniqueEmail, "Email already registered")),
        _ => None,
    }
}

/// Translate a `DbErr` into a `DomainError` with PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(
                NotFoundKind::Other("Record".into()),
                "Record not found",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if error_msg.contains("UNIQUE constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some((kind, detail)) = unique_violation_target(&error_msg).and_then(conflict_for_target)
        {
            return DomainError::conflict(kind, detail);
        }
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if error_msg.contains("FOREIGN KEY constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Referenced record does not exist");
    }

    if error_msg.contains("database is locked") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database busy or timed out");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "Database operation failed",
    )
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}
