//! Domain-level error type used across repos and adapters.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

use tracing::{error, warn};

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    DataCorruption,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Book,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Input validation failure
    Validation(String),
    /// Missing resource in domain terms
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    Infra(InfraErrorKind, String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(d) => write!(f, "validation error: {d}"),
            DomainError::NotFound(kind, d) => write!(f, "not found {kind:?}: {d}"),
            DomainError::Infra(kind, d) => write!(f, "infra {kind:?}: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::Validation(detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
///
/// The raw driver message is logged but never surfaced to clients.
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        match &e {
            sea_orm::DbErr::RecordNotFound(_) => {
                DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found")
            }
            sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
                warn!(error = %e, "database connection unavailable");
                DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable")
            }
            sea_orm::DbErr::Type(_) | sea_orm::DbErr::TryIntoErr { .. } => {
                error!(error = %e, "stored row could not be decoded");
                DomainError::infra(InfraErrorKind::DataCorruption, "Stored data is invalid")
            }
            _ => {
                let message = e.to_string();
                if message.to_ascii_lowercase().contains("timeout") {
                    warn!(error = %e, "database operation timed out");
                    DomainError::infra(InfraErrorKind::Timeout, "Database timeout")
                } else {
                    error!(error = %e, "database operation failed");
                    DomainError::infra(
                        InfraErrorKind::Other("DbErr".into()),
                        "Database operation failed",
                    )
                }
            }
        }
    }
}
