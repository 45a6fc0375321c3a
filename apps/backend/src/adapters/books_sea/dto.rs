//! Write-side DTO for the books adapter.

/// Column values for inserting or replacing a book row.
#[derive(Debug, Clone, PartialEq)]
pub struct BookWrite {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub stock: i32,
}
