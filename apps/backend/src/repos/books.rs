//! Repository layer for the book catalog.

use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::adapters::books_sea::{self as adapter, BookWrite};
use crate::entities::books;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: u32,
}

/// Fields supplied when creating or replacing a book.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub total_items: u64,
    pub total_pages: u64,
}

impl TryFrom<books::Model> for Book {
    type Error = DomainError;

    fn try_from(model: books::Model) -> Result<Self, Self::Error> {
        let stock = u32::try_from(model.stock).map_err(|_| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("negative stock {} stored for book {}", model.stock, model.id),
            )
        })?;
        Ok(Self {
            id: model.id,
            title: model.title,
            author: model.author,
            price: model.price,
            stock,
        })
    }
}

impl TryFrom<BookInput> for BookWrite {
    type Error = DomainError;

    fn try_from(input: BookInput) -> Result<Self, Self::Error> {
        let stock = i32::try_from(input.stock)
            .map_err(|_| DomainError::validation(format!("stock {} is too large", input.stock)))?;
        Ok(Self {
            title: input.title,
            author: input.author,
            price: input.price,
            stock,
        })
    }
}

fn not_found(id: i64) -> DomainError {
    DomainError::not_found(NotFoundKind::Book, format!("Book {id} not found"))
}

pub async fn list<C: ConnectionTrait>(
    conn: &C,
    page: u64,
    page_size: u64,
) -> Result<BookPage, DomainError> {
    let rows = adapter::list_page(conn, page, page_size).await?;
    let books = rows
        .rows
        .into_iter()
        .map(Book::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(BookPage {
        books,
        total_items: rows.total_items,
        total_pages: rows.total_pages,
    })
}

pub async fn get<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Book, DomainError> {
    adapter::find_by_id(conn, id)
        .await?
        .ok_or_else(|| not_found(id))
        .and_then(Book::try_from)
}

pub async fn create<C: ConnectionTrait>(conn: &C, input: BookInput) -> Result<Book, DomainError> {
    let model = adapter::insert(conn, input.try_into()?).await?;
    Book::try_from(model)
}

pub async fn replace<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    input: BookInput,
) -> Result<Book, DomainError> {
    adapter::update(conn, id, input.try_into()?)
        .await?
        .ok_or_else(|| not_found(id))
        .and_then(Book::try_from)
}

pub async fn delete<C: ConnectionTrait>(conn: &C, id: i64) -> Result<(), DomainError> {
    if adapter::delete(conn, id).await? {
        Ok(())
    } else {
        Err(not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::DatabaseConnection;

    use super::*;
    use crate::config::db::DbKind;
    use crate::infra::db::bootstrap_db;

    async fn db() -> DatabaseConnection {
        bootstrap_db(&DbKind::SqliteMemory).await.unwrap()
    }

    fn input(title: &str) -> BookInput {
        BookInput {
            title: title.to_string(),
            author: "Frank Herbert".to_string(),
            price: 9.99,
            stock: 4,
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let conn = db().await;
        let created = create(&conn, input("Dune")).await.unwrap();
        assert!(created.id > 0);
        assert_eq!(get(&conn, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let conn = db().await;
        let err = replace(&conn, 99, input("x")).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Book, _)));
        let err = delete(&conn, 99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Book, _)));
        let err = get(&conn, 99).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound(NotFoundKind::Book, _)));
    }

    #[tokio::test]
    async fn replace_overwrites_all_fields() {
        let conn = db().await;
        let created = create(&conn, input("Dune")).await.unwrap();
        let updated = replace(
            &conn,
            created.id,
            BookInput {
                title: "Dune Messiah".into(),
                author: "F. Herbert".into(),
                price: 12.5,
                stock: 0,
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "Dune Messiah");
        assert_eq!(updated.author, "F. Herbert");
        assert_eq!(updated.stock, 0);
    }

    #[tokio::test]
    async fn pages_are_zero_based_and_ordered() {
        let conn = db().await;
        for i in 0..5 {
            create(&conn, input(&format!("Book {i}"))).await.unwrap();
        }

        let first = list(&conn, 0, 2).await.unwrap();
        assert_eq!(first.total_items, 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.books[0].title, "Book 0");

        let last = list(&conn, 2, 2).await.unwrap();
        assert_eq!(last.books.len(), 1);
        assert_eq!(last.books[0].title, "Book 4");

        assert!(list(&conn, 9, 2).await.unwrap().books.is_empty());
    }

    #[test]
    fn oversized_stock_is_a_validation_error() {
        let mut big = input("x");
        big.stock = u32::MAX;
        let err = BookWrite::try_from(big).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
