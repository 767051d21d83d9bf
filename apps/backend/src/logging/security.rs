use tracing::warn;

use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Log a failed login attempt. `login` is the submitted username or email.
pub fn login_failed(reason: &str, login: &str) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_LOGIN_FAILED",
        %trace_id,
        login = %Redacted(login),
        reason,
        "Authentication failure"
    );
}

/// Log an authenticated caller touching a resource they do not own.
pub fn ownership_denied(user_id: i64, resource: &str, resource_id: i64) {
    let trace_id = trace_ctx::trace_id();

    warn!(
        event = "SECURITY_OWNERSHIP_DENIED",
        %trace_id,
        user_id,
        resource,
        resource_id,
        "Ownership check failed"
    );
}
