//! Test helpers shared by the backend's unit and integration tests.
//!
//! Kept free of backend types so both test flavours can depend on it.

pub mod envelope;
pub mod logging;
