//! Token issuance and the per-request authentication gate.

pub mod claims;
pub mod error;
pub mod gate;
pub mod issuer;

pub use claims::PrincipalClaims;
pub use error::AuthError;
pub use gate::{bearer_token, evaluate, verify_token, GateOutcome};
pub use issuer::{issue, issue_token, IssuedToken};
