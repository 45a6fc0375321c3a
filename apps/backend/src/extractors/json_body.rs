use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use tracing::debug;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::trace_ctx;

/// Upper bound on accepted request bodies.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// JSON body extractor whose failures render through `AppError` as a
/// `400 BAD_REQUEST` envelope instead of actix's plain-text default.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T> JsonBody<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for JsonBody<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for JsonBody<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    debug!(trace_id = %trace_ctx::trace_id(), error = %e, "body read failed");
                    AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        ErrorCode::BadRequest,
                        format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            serde_json::from_slice::<T>(&body)
                .map(JsonBody)
                .map_err(|e| {
                    debug!(
                        trace_id = %trace_ctx::trace_id(),
                        body_size = body.len(),
                        "JSON body rejected"
                    );
                    AppError::bad_request(ErrorCode::BadRequest, describe(&e))
                })
        })
    }
}

/// Client-safe description of a parse failure. Never echoes body content.
fn describe(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: wrong types for one or more fields".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Sample {
        title: String,
        stock: u32,
    }

    #[actix_web::test]
    async fn parses_valid_body() {
        let (req, mut payload) = TestRequest::default()
            .set_payload(r#"{"title":"Dune","stock":3}"#)
            .to_http_parts();
        let body = JsonBody::<Sample>::from_request(&req, &mut payload)
            .await
            .unwrap();
        assert_eq!(body.title, "Dune");
        assert_eq!(body.stock, 3);
    }

    #[actix_web::test]
    async fn wrong_types_are_bad_request() {
        let (req, mut payload) = TestRequest::default()
            .set_payload(r#"{"title":"Dune","stock":-1}"#)
            .to_http_parts();
        let err = JsonBody::<Sample>::from_request(&req, &mut payload)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadRequest);
        assert!(err.to_string().contains("wrong types"));
    }

    #[test]
    fn describes_truncated_input() {
        let err = serde_json::from_str::<Sample>(r#"{"title":"x""#).unwrap_err();
        assert!(describe(&err).contains("unexpected end"));
    }
}
