pub mod request_trace;
pub mod require_auth;
pub mod structured_logger;
pub mod trace_span;

pub use request_trace::{RequestId, RequestTrace};
pub use require_auth::RequireAuth;
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
