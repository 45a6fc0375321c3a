//! SeaORM adapter for the books table, generic over `ConnectionTrait`.
//!
//! Functions return `DbErr`; the repo layer maps to `DomainError`.

use sea_orm::{
    ActiveModelTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryOrder, Set,
};

use crate::entities::books;

pub mod dto;

pub use dto::BookWrite;

/// One page of rows plus the totals needed for page metadata.
#[derive(Debug, Clone)]
pub struct RowsPage {
    pub rows: Vec<books::Model>,
    pub total_items: u64,
    pub total_pages: u64,
}

/// Rows of 0-based page `page`, ordered by id. `page_size` must be non-zero.
pub async fn list_page<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    page_size: u64,
) -> Result<RowsPage, sea_orm::DbErr> {
    let paginator = books::Entity::find()
        .order_by_asc(books::Column::Id)
        .paginate(conn, page_size);

    let totals = paginator.num_items_and_pages().await?;
    let rows = paginator.fetch_page(page).await?;

    Ok(RowsPage {
        rows,
        total_items: totals.number_of_items,
        total_pages: totals.number_of_pages,
    })
}

pub async fn find_by_id<C: ConnectionTrait>(
    conn: &C,
    id: i64,
) -> Result<Option<books::Model>, sea_orm::DbErr> {
    books::Entity::find_by_id(id).one(conn).await
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    book: BookWrite,
) -> Result<books::Model, sea_orm::DbErr> {
    books::ActiveModel {
        id: NotSet,
        title: Set(book.title),
        author: Set(book.author),
        price: Set(book.price),
        stock: Set(book.stock),
    }
    .insert(conn)
    .await
}

/// Replace every column of row `id`. `None` when the row does not exist.
pub async fn update<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    book: BookWrite,
) -> Result<Option<books::Model>, sea_orm::DbErr> {
    let Some(existing) = find_by_id(conn, id).await? else {
        return Ok(None);
    };

    let mut active: books::ActiveModel = existing.into();
    active.title = Set(book.title);
    active.author = Set(book.author);
    active.price = Set(book.price);
    active.stock = Set(book.stock);
    active.update(conn).await.map(Some)
}

/// Delete row `id`, returning whether a row was removed.
pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> Result<bool, sea_orm::DbErr> {
    let result = books::Entity::delete_by_id(id).exec(conn).await?;
    Ok(result.rows_affected > 0)
}
