//! Assertions over the two error shapes the backend emits:
//! `401 {"error": "..."}` from the auth gate and the `ApiResponse` error
//! envelope from everything else.

use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GateRejection {
    error: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    status: String,
    message: String,
    error: String,
}

/// `Authorization` header tuple for `TestRequest::insert_header`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

/// Assert a gate rejection: 401, `WWW-Authenticate: Bearer`, and a body of
/// exactly `{"error": expected_reason}`.
pub fn assert_unauthorized(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_reason: &str,
) {
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        headers
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer"),
        "missing WWW-Authenticate challenge"
    );

    let value: serde_json::Value =
        serde_json::from_slice(body).expect("401 body should be JSON");
    let object = value.as_object().expect("401 body should be an object");
    assert_eq!(object.len(), 1, "401 body carries only the reason: {value}");

    let rejection: GateRejection =
        serde_json::from_value(value.clone()).expect("401 body should have `error`");
    assert_eq!(rejection.error, expected_reason);
}

/// Assert an `ApiResponse` error envelope with `expected_code` and an
/// `x-trace-id` header. Returns the client-facing message.
pub fn assert_error_envelope(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: StatusCode,
    expected_code: &str,
) -> String {
    assert_eq!(status, expected_status);
    assert!(
        headers.contains_key("x-trace-id"),
        "error responses carry x-trace-id"
    );

    let envelope: ErrorEnvelope =
        serde_json::from_slice(body).expect("body should be an error envelope");
    assert_eq!(envelope.status, "Error");
    assert_eq!(envelope.error, expected_code);
    envelope.message
}
