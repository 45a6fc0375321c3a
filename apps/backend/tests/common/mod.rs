#![allow(dead_code)]

use std::time::SystemTime;

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use actix_web::web::Bytes;
use bookshelf::auth::issuer::{issue, issue_token};
use bookshelf::config::{DbKind, Principal};
use bookshelf::infra::state::build_state;
use bookshelf::state::{AppState, SecurityConfig};

pub mod proptest_prelude;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

pub fn security() -> SecurityConfig {
    SecurityConfig::new(SECRET.as_bytes())
}

/// State backed by a freshly migrated in-memory SQLite database.
pub async fn state_with_db() -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory)
        .with_security(security())
        .build()
        .await
        .expect("in-memory state")
}

pub fn fresh_token() -> String {
    issue(&Principal::default(), &security()).expect("issue token")
}

pub fn token_issued_at(now: SystemTime) -> String {
    issue_token(&Principal::default(), now, "integration", &security())
        .expect("issue token")
        .token
}

/// Render a middleware error the way the server would.
pub async fn error_parts(err: actix_web::Error) -> (StatusCode, HeaderMap, Bytes) {
    let resp = err.error_response();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::body::to_bytes(resp.into_body())
        .await
        .expect("error body");
    (status, headers, body)
}

/// Build the full application (middleware stack and routes) around `$state`.
#[macro_export]
macro_rules! test_app {
    ($state:expr) => {{
        let state: bookshelf::state::AppState = $state;
        let security = std::sync::Arc::clone(&state.security);
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(bookshelf::middleware::StructuredLogger)
                .wrap(bookshelf::middleware::TraceSpan)
                .wrap(bookshelf::middleware::RequestTrace)
                .app_data(actix_web::web::Data::new(state))
                .configure(move |cfg| bookshelf::routes::configure(cfg, &security)),
        )
        .await
    }};
}
