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
pub mod middleware;
pub mod repos;
pub mod response;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

pub use auth::{evaluate, issue, issue_token, verify_token, AuthError, GateOutcome, PrincipalClaims};
pub use config::{DbKind, Principal, ServerConfig};
pub use error::AppError;
pub use extractors::{BookId, Identity};
pub use infra::db::{bootstrap_db, connect_db};
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{RequestTrace, RequireAuth, StructuredLogger, TraceSpan};
pub use state::{AppState, SecurityConfig};

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
