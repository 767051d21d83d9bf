//! Request middleware.
//!
//! Wire order (last `wrap` runs first):
//!
//! ```ignore
//! App::new()
//!     .wrap(StructuredLogger)
//!     .wrap(TraceSpan)
//!     .wrap(RequestTrace)
//! ```

pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use request_trace::RequestTrace;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;

/// Response header carrying the request's trace id.
pub const TRACE_ID_HEADER: &str = "x-trace-id";
