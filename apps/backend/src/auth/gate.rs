//! Per-request authentication gate.
//!
//! `evaluate` runs the three checks in order and stops at the first failure:
//! bearer extraction, structural/algorithm/signature verification, then claim
//! validation against the supplied instant. It holds no state between calls.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Header, Validation};
use serde::Deserialize;

use crate::auth::claims::PrincipalClaims;
use crate::auth::error::AuthError;
use crate::extractors::identity::Identity;
use crate::state::security_config::SecurityConfig;

const BEARER_PREFIX: &str = "Bearer ";

/// Result of running the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Authorized(Identity),
    Rejected(AuthError),
}

/// Minimal view of the JOSE header, read before handing the token to
/// `jsonwebtoken` so that unknown algorithms such as `none` are classified.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Pull the raw token out of an `Authorization` header value.
///
/// The scheme prefix is case-sensitive and must be followed by a single space.
pub fn bearer_token(authorization: Option<&[u8]>) -> Result<&str, AuthError> {
    let raw = match authorization {
        Some(bytes) if !bytes.is_empty() => bytes,
        _ => return Err(AuthError::MissingCredential),
    };

    let value = std::str::from_utf8(raw).map_err(|_| AuthError::MalformedCredential)?;
    let token = value
        .strip_prefix(BEARER_PREFIX)
        .ok_or(AuthError::MalformedCredential)?;

    Ok(token.trim())
}

/// Verify structure, algorithm, signature and claims of `token` at `now`.
pub fn verify_token(
    token: &str,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<PrincipalClaims, AuthError> {
    let mut segments = token.split('.');
    let (Some(encoded_header), Some(_), Some(_), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::MalformedToken);
    };

    check_header(encoded_header, security.algorithm)?;

    // Time and issuer checks happen below against the caller's clock, with no leeway.
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.required_spec_claims.clear();

    let claims = decode::<PrincipalClaims>(
        token,
        &DecodingKey::from_secret(security.jwt_secret()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::from_jwt(&e))?;

    validate_claims(&claims, security, now)?;
    Ok(claims)
}

/// Run the full gate over an optional `Authorization` header value.
pub fn evaluate(
    authorization: Option<&[u8]>,
    security: &SecurityConfig,
    now: SystemTime,
) -> GateOutcome {
    match bearer_token(authorization).and_then(|token| verify_token(token, security, now)) {
        Ok(claims) => GateOutcome::Authorized(Identity::new(claims)),
        Err(e) => GateOutcome::Rejected(e),
    }
}

fn check_header(encoded_header: &str, expected: Algorithm) -> Result<(), AuthError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded_header)
        .map_err(|_| AuthError::MalformedToken)?;
    let raw: RawHeader = serde_json::from_slice(&bytes).map_err(|_| AuthError::MalformedToken)?;

    match raw.alg.parse::<Algorithm>() {
        Ok(alg) if alg == expected => {}
        _ => return Err(AuthError::UnsupportedAlgorithm),
    }

    // The rest of the header must still be a well-formed JOSE header.
    serde_json::from_slice::<Header>(&bytes).map_err(|_| AuthError::MalformedToken)?;
    Ok(())
}

fn validate_claims(
    claims: &PrincipalClaims,
    security: &SecurityConfig,
    now: SystemTime,
) -> Result<(), AuthError> {
    if claims.iss != security.issuer
        || claims.role.trim().is_empty()
        || !claims.has_ordered_window()
    {
        return Err(AuthError::InvalidClaims);
    }

    let now = unix_seconds(now);
    if now >= claims.exp {
        return Err(AuthError::TokenExpired);
    }
    if now < claims.nbf {
        return Err(AuthError::TokenNotYetValid);
    }
    Ok(())
}

fn unix_seconds(t: SystemTime) -> i64 {
    t.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
