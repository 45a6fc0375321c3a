use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;

use crate::db::require_db;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{BookId, Identity, JsonBody};
use crate::repos::books::{self, Book, BookInput};
use crate::response::{ApiResponse, PageInfo};
use crate::state::app_state::AppState;

pub const DEFAULT_PAGE_SIZE: u64 = 10;

#[derive(Debug, Deserialize)]
struct ListParams {
    page: Option<u64>,
    limit: Option<u64>,
}

/// `page` is 0-based; `limit` must be positive.
fn page_params(query: &str) -> Result<(u64, u64), AppError> {
    let params = web::Query::<ListParams>::from_query(query).map_err(|_| {
        AppError::bad_request(
            ErrorCode::InvalidPagination,
            "page and limit must be non-negative integers",
        )
    })?;

    let page = params.page.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE);
    if limit == 0 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidPagination,
            "limit must be greater than zero",
        ));
    }
    Ok((page, limit))
}

async fn list_books(
    req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = page_params(req.query_string())?;
    let db = require_db(&app_state)?;
    let result = books::list(db, page, limit).await?;

    let info = PageInfo {
        total_items: result.total_items,
        current_page: page,
        page_size: limit,
        total_pages: result.total_pages,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(result.books).with_page(info)))
}

async fn get_book(
    id: BookId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let book: Book = books::get(db, id.get()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(book)))
}

async fn create_book(
    identity: Identity,
    body: JsonBody<BookInput>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let book = books::create(db, body.into_inner()).await?;
    info!(user_id = identity.user_id(), book_id = book.id, "book created");
    Ok(HttpResponse::Created().json(ApiResponse::ok(book)))
}

async fn update_book(
    identity: Identity,
    id: BookId,
    body: JsonBody<BookInput>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let book = books::replace(db, id.get(), body.into_inner()).await?;
    info!(user_id = identity.user_id(), book_id = book.id, "book updated");
    Ok(HttpResponse::Ok().json(ApiResponse::ok(book)))
}

async fn delete_book(
    identity: Identity,
    id: BookId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    books::delete(db, id.get()).await?;
    info!(user_id = identity.user_id(), book_id = id.get(), "book deleted");
    Ok(HttpResponse::Ok().json(ApiResponse::ok_empty()))
}

/// Routes that only read the catalog.
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_books))
        .route("/{id}", web::get().to(get_book));
}

/// Routes that change the catalog. Mount behind `RequireAuth`.
pub fn configure_protected(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_book))
        .route("/{id}", web::put().to(update_book))
        .route("/{id}", web::delete().to(delete_book));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        assert_eq!(page_params("").unwrap(), (0, DEFAULT_PAGE_SIZE));
        assert_eq!(page_params("page=3").unwrap(), (3, DEFAULT_PAGE_SIZE));
        assert_eq!(page_params("page=1&limit=25").unwrap(), (1, 25));
    }

    #[test]
    fn pagination_rejects_zero_and_garbage() {
        for query in ["limit=0", "page=-1", "limit=ten"] {
            let err = page_params(query).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidPagination, "query {query}");
        }
    }
}
