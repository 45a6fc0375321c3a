pub mod books;

pub use books::Entity as Books;
pub use books::Model as BookRow;
