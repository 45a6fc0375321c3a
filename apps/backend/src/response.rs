//! JSON response envelope shared by the book routes and `AppError`.

use serde::{Deserialize, Serialize};

use crate::errors::ErrorCode;

pub const MESSAGE_OK: &str = "OK";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Error")]
    Error,
}

/// Pagination metadata attached to list responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub total_items: u64,
    pub current_page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: MESSAGE_OK.to_string(),
            data: Some(data),
            error: None,
            page: None,
        }
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }
}

impl ApiResponse<()> {
    /// Success without a payload (update/delete).
    pub fn ok_empty() -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: MESSAGE_OK.to_string(),
            data: None,
            error: None,
            page: None,
        }
    }

    pub fn error(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            data: None,
            error: Some(code.as_str()),
            page: None,
        }
    }
}
