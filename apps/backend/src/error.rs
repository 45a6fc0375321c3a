use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::errors::ErrorCode;
use crate::response::ApiResponse;
use crate::trace_ctx;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {detail}")]
    Validation { code: ErrorCode, detail: String },
    #[error("Bad request: {detail}")]
    BadRequest { code: ErrorCode, detail: String },
    #[error("Not found: {detail}")]
    NotFound { code: ErrorCode, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
    #[error("Timeout: {detail}")]
    Timeout { detail: String },
    #[error("Internal error: {detail}")]
    Internal { code: ErrorCode, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Validation { code, .. } => *code,
            AppError::BadRequest { code, .. } => *code,
            AppError::NotFound { code, .. } => *code,
            AppError::Db { .. } => ErrorCode::DbError,
            AppError::DbUnavailable => ErrorCode::DbUnavailable,
            AppError::Timeout { .. } => ErrorCode::DbTimeout,
            AppError::Internal { code, .. } => *code,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Client-facing message. Server-side failures get a generic message so
    /// driver or configuration details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AppError::Validation { detail, .. }
            | AppError::BadRequest { detail, .. }
            | AppError::NotFound { detail, .. } => detail.clone(),
            AppError::DbUnavailable => "Service temporarily unavailable".to_string(),
            AppError::Timeout { .. } => "Request timed out".to_string(),
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                "Internal server error".to_string()
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Db { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::DbUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn invalid(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::Validation {
            code,
            detail: detail.into(),
        }
    }

    pub fn bad_request(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            detail: detail.into(),
        }
    }

    pub fn not_found(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self::NotFound {
            code,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            code: ErrorCode::Internal,
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::invalid(ErrorCode::ValidationError, detail),
            DomainError::NotFound(NotFoundKind::Book, detail) => {
                AppError::not_found(ErrorCode::BookNotFound, detail)
            }
            DomainError::NotFound(_, detail) => AppError::not_found(ErrorCode::NotFound, detail),
            DomainError::Infra(InfraErrorKind::DbUnavailable, _) => AppError::DbUnavailable,
            DomainError::Infra(InfraErrorKind::Timeout, detail) => AppError::Timeout { detail },
            DomainError::Infra(InfraErrorKind::DataCorruption, detail) => AppError::Internal {
                code: ErrorCode::DataCorruption,
                detail,
            },
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::from(e).into()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(code = %self.code(), error = %self, trace_id = %trace_id, "request failed");
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(ApiResponse::error(self.code(), self.public_message()))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::body::to_bytes;
    use serde_json::Value;

    use super::*;

    #[test]
    fn maps_domain_not_found_to_404() {
        let app: AppError = DomainError::not_found(NotFoundKind::Book, "Book 9 not found").into();
        assert_eq!(app.code(), ErrorCode::BookNotFound);
        assert_eq!(app.status().as_u16(), 404);
    }

    #[test]
    fn maps_infra() {
        let app: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
        assert_eq!(app.code(), ErrorCode::DbTimeout);
        assert_eq!(app.status().as_u16(), 504);

        let app: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
        assert_eq!(app.code(), ErrorCode::DbUnavailable);
        assert_eq!(app.status().as_u16(), 503);

        let app: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad").into();
        assert_eq!(app.code(), ErrorCode::DataCorruption);
        assert_eq!(app.status().as_u16(), 500);
    }

    #[actix_web::test]
    async fn server_errors_do_not_leak_detail() {
        let err = AppError::db("password authentication failed for user catalog");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().contains_key("x-trace-id"));

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "Error");
        assert_eq!(json["error"], "DB_ERROR");
        assert_eq!(json["message"], "Internal server error");
    }

    #[actix_web::test]
    async fn client_errors_carry_detail() {
        let err = AppError::bad_request(ErrorCode::InvalidBookId, "Invalid book id: abc");
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(resp.into_body()).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "INVALID_BOOK_ID");
        assert_eq!(json["message"], "Invalid book id: abc");
    }
}
