pub mod book_id;
pub mod identity;
pub mod json_body;

pub use book_id::BookId;
pub use identity::Identity;
pub use json_body::JsonBody;
