use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Book id taken from the `{id}` path segment. Must be a positive integer.
///
/// Existence is not checked here; the repository reports a missing row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookId(pub i64);

impl BookId {
    pub fn get(self) -> i64 {
        self.0
    }
}

fn parse_book_id(raw: Option<&str>) -> Result<BookId, AppError> {
    let raw = raw.ok_or_else(|| {
        AppError::bad_request(ErrorCode::InvalidBookId, "Missing book id parameter")
    })?;

    let id = raw.parse::<i64>().map_err(|_| {
        AppError::bad_request(ErrorCode::InvalidBookId, format!("Invalid book id: {raw}"))
    })?;

    if id <= 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidBookId,
            format!("Book id must be positive, got: {id}"),
        ));
    }

    Ok(BookId(id))
}

impl FromRequest for BookId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_book_id(req.match_info().get("id")))
    }
}
