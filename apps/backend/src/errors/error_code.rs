//! Error codes for the bookshelf API.
//!
//! This module defines all error codes used throughout the application.
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses and structured logs.

use core::fmt;

/// Centralized error codes for the bookshelf API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// No Authorization header on a gated route
    MissingCredential,
    /// Authorization header without the Bearer scheme
    MalformedCredential,
    /// Token is not three well-formed segments
    MalformedToken,
    /// Token declares an algorithm other than the configured one
    UnsupportedAlgorithm,
    /// MAC does not match
    InvalidSignature,
    /// Payload is missing claims or has the wrong shape
    InvalidClaims,
    /// Token is past its `exp`
    TokenExpired,
    /// Token is before its `nbf`
    TokenNotYetValid,

    // Request Validation
    /// Invalid book ID provided
    InvalidBookId,
    /// Invalid page/limit query parameters
    InvalidPagination,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Book not found
    BookNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Stored data could not be interpreted
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MissingCredential => "MISSING_CREDENTIAL",
            Self::MalformedCredential => "MALFORMED_CREDENTIAL",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::UnsupportedAlgorithm => "UNSUPPORTED_ALGORITHM",
            Self::InvalidSignature => "INVALID_SIGNATURE",
            Self::InvalidClaims => "INVALID_CLAIMS",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenNotYetValid => "TOKEN_NOT_YET_VALID",

            Self::InvalidBookId => "INVALID_BOOK_ID",
            Self::InvalidPagination => "INVALID_PAGINATION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::BookNotFound => "BOOK_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::MissingCredential,
        ErrorCode::MalformedCredential,
        ErrorCode::MalformedToken,
        ErrorCode::UnsupportedAlgorithm,
        ErrorCode::InvalidSignature,
        ErrorCode::InvalidClaims,
        ErrorCode::TokenExpired,
        ErrorCode::TokenNotYetValid,
        ErrorCode::InvalidBookId,
        ErrorCode::InvalidPagination,
        ErrorCode::ValidationError,
        ErrorCode::BadRequest,
        ErrorCode::BookNotFound,
        ErrorCode::NotFound,
        ErrorCode::DbError,
        ErrorCode::DbUnavailable,
        ErrorCode::DbTimeout,
        ErrorCode::DataCorruption,
        ErrorCode::Internal,
        ErrorCode::ConfigError,
    ];

    #[test]
    fn test_error_code_strings() {
        assert_eq!(ErrorCode::MissingCredential.as_str(), "MISSING_CREDENTIAL");
        assert_eq!(
            ErrorCode::UnsupportedAlgorithm.as_str(),
            "UNSUPPORTED_ALGORITHM"
        );
        assert_eq!(ErrorCode::TokenNotYetValid.as_str(), "TOKEN_NOT_YET_VALID");
        assert_eq!(ErrorCode::BookNotFound.as_str(), "BOOK_NOT_FOUND");
        assert_eq!(ErrorCode::DbUnavailable.as_str(), "DB_UNAVAILABLE");
    }

    #[test]
    fn codes_are_unique_and_screaming_snake_case() {
        let mut seen = HashSet::new();
        for code in ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "duplicate error code {s}");
            assert!(
                s.chars().all(|c| c.is_ascii_uppercase() || c == '_'),
                "{s} is not SCREAMING_SNAKE_CASE"
            );
        }
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", ErrorCode::InvalidSignature), "INVALID_SIGNATURE");
        assert_eq!(format!("{}", ErrorCode::InvalidBookId), "INVALID_BOOK_ID");
    }
}
