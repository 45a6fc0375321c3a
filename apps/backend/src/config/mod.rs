pub mod db;
pub mod principal;
pub mod server;

pub use db::DbKind;
pub use principal::Principal;
pub use server::ServerConfig;
