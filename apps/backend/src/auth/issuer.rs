//! Token issuance for the configured principal.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, EncodingKey, Header};
use uuid::Uuid;

use crate::auth::claims::PrincipalClaims;
use crate::config::principal::Principal;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// A signed token together with the claims it carries.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: PrincipalClaims,
}

/// Build the claims for `principal` at `now`: `iat = nbf = now`,
/// `exp = now + security.token_ttl`.
pub fn claims_for(
    principal: &Principal,
    now: SystemTime,
    token_id: &str,
    security: &SecurityConfig,
) -> Result<PrincipalClaims, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|d| i64::try_from(d.as_secs()).ok())
        .ok_or_else(|| AppError::internal("System clock is outside the supported range"))?;

    let ttl = i64::try_from(security.token_ttl.as_secs())
        .map_err(|_| AppError::internal("token TTL is out of range"))?;
    if ttl <= 0 {
        return Err(AppError::internal("token TTL must be at least one second"));
    }
    let exp = iat
        .checked_add(ttl)
        .ok_or_else(|| AppError::internal("token expiry overflows the timestamp range"))?;

    Ok(PrincipalClaims {
        user_id: principal.user_id,
        user_name: principal.user_name.clone(),
        role: principal.role.clone(),
        exp,
        iat,
        nbf: iat,
        iss: security.issuer.clone(),
        sub: principal.subject.clone(),
        jti: token_id.to_string(),
    })
}

/// Mint a signed token at an explicit instant with an explicit token id.
pub fn issue_token(
    principal: &Principal,
    now: SystemTime,
    token_id: &str,
    security: &SecurityConfig,
) -> Result<IssuedToken, AppError> {
    let claims = claims_for(principal, now, token_id, security)?;

    let token = encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(security.jwt_secret()),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))?;

    Ok(IssuedToken { token, claims })
}

/// Mint a token for `principal` valid from now, with a fresh token id.
pub fn issue(principal: &Principal, security: &SecurityConfig) -> Result<String, AppError> {
    let token_id = Uuid::new_v4().to_string();
    issue_token(principal, SystemTime::now(), &token_id, security).map(|issued| issued.token)
}
