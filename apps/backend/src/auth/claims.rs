//! Claims carried by tokens issued to the catalog principal.

use serde::{Deserialize, Serialize};

/// Principal claims embedded in every token and attached to gated requests.
///
/// Field names are the wire names; timestamps are seconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipalClaims {
    pub user_id: i64,
    pub user_name: String,
    pub role: String,
    /// Expiry
    pub exp: i64,
    /// Issued-at
    pub iat: i64,
    /// Not-before
    pub nbf: i64,
    pub iss: String,
    pub sub: String,
    /// Token instance id, kept for audit trails only
    pub jti: String,
}

impl PrincipalClaims {
    /// `nbf <= iat < exp`
    pub fn has_ordered_window(&self) -> bool {
        self.nbf <= self.iat && self.iat < self.exp
    }
}
