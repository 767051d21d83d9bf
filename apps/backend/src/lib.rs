#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod pages;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod trace_ctx;

// Re-exports for public API
pub use auth::jwt::{issue, verify, Claims};
pub use auth::password::{hash_password, verify_password};
pub use config::Settings;
pub use error::AppError;
pub use extractors::{AuthSubject, AuthToken, CurrentUser, ValidatedJson};
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::build_state;
pub use middleware::{RequestTrace, StructuredLogger, TraceSpan};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::jwt::*;
    pub use super::error::*;
    pub use super::extractors::*;
    pub use super::middleware::*;
    pub use super::state::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
