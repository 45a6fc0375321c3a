//! Database connection and application state assembly.

pub mod db;
pub mod state;

pub use state::{build_state, StateBuilder};
