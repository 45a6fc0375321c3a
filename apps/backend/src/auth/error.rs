//! Rejection reasons produced by the request gate.

use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;

/// Every way a gated request can be refused. All kinds are request-local and
/// render as `401` with `{"error": "<reason>"}`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredential,
    #[error("Authorization header must use the Bearer scheme")]
    MalformedCredential,
    #[error("malformed token")]
    MalformedToken,
    #[error("unsupported signing algorithm")]
    UnsupportedAlgorithm,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("invalid token claims")]
    InvalidClaims,
    #[error("token expired")]
    TokenExpired,
    #[error("token not yet valid")]
    TokenNotYetValid,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::MissingCredential => ErrorCode::MissingCredential,
            AuthError::MalformedCredential => ErrorCode::MalformedCredential,
            AuthError::MalformedToken => ErrorCode::MalformedToken,
            AuthError::UnsupportedAlgorithm => ErrorCode::UnsupportedAlgorithm,
            AuthError::InvalidSignature => ErrorCode::InvalidSignature,
            AuthError::InvalidClaims => ErrorCode::InvalidClaims,
            AuthError::TokenExpired => ErrorCode::TokenExpired,
            AuthError::TokenNotYetValid => ErrorCode::TokenNotYetValid,
        }
    }

    /// Map a `jsonwebtoken` failure onto exactly one rejection kind.
    pub(crate) fn from_jwt(e: &jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm
            }
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            ErrorKind::Json(_) | ErrorKind::MissingRequiredClaim(_) | ErrorKind::InvalidIssuer => {
                AuthError::InvalidClaims
            }
            _ => AuthError::MalformedToken,
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized()
            .insert_header((header::WWW_AUTHENTICATE, "Bearer"))
            .json(AuthErrorBody {
                error: self.to_string(),
            })
    }
}
