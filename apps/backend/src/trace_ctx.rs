//! Task-local trace id for the request being served.
//!
//! `RequestTrace` scopes every request future with its trace id, so error
//! responses and log lines can pick it up without threading it through
//! handler signatures.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the current request, or `"unknown"` outside a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` installed as the current trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
