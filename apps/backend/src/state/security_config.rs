use std::env;
use std::fmt;
use std::time::Duration;

use jsonwebtoken::Algorithm;
use tracing::warn;

use crate::error::AppError;

/// Default token lifetime: 24 hours.
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest token lifetime accepted from configuration: 365 days.
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Default `iss` claim stamped into issued tokens and required on verification.
pub const DEFAULT_ISSUER: &str = "bookshelf";

/// Secrets shorter than this still work but get a startup warning.
const RECOMMENDED_SECRET_LEN: usize = 32;

/// Configuration for JWT security settings.
///
/// Shared read-only by the token issuer and the request gate. The secret is
/// never exposed through `Debug`.
#[derive(Clone)]
pub struct SecurityConfig {
    jwt_secret: Vec<u8>,
    /// JWT algorithm to use (always HS256)
    pub algorithm: Algorithm,
    /// Value of the `iss` claim
    pub issuer: String,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
}

impl SecurityConfig {
    /// Create a new SecurityConfig with the given JWT secret and default issuer/TTL
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            issuer: DEFAULT_ISSUER.to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Override the token lifetime. Must lie in `1s..=MAX_TOKEN_TTL`.
    pub fn with_token_ttl(mut self, ttl: Duration) -> Result<Self, AppError> {
        if ttl.is_zero() {
            return Err(AppError::config("token TTL must be greater than zero"));
        }
        if ttl > MAX_TOKEN_TTL {
            return Err(AppError::config(format!(
                "token TTL must not exceed {} seconds",
                MAX_TOKEN_TTL.as_secs()
            )));
        }
        self.token_ttl = ttl;
        Ok(self)
    }

    /// Raw secret bytes for signing and verification.
    pub fn jwt_secret(&self) -> &[u8] {
        &self.jwt_secret
    }

    /// Load from `APP_JWT_SECRET`, `APP_JWT_ISSUER` and `APP_TOKEN_TTL_SECS`.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var("APP_JWT_SECRET").map_err(|_| {
            AppError::config("Required environment variable 'APP_JWT_SECRET' is not set")
        })?;
        if secret.is_empty() {
            return Err(AppError::config("APP_JWT_SECRET must not be empty"));
        }
        if secret.len() < RECOMMENDED_SECRET_LEN {
            warn!(
                min_len = RECOMMENDED_SECRET_LEN,
                "APP_JWT_SECRET is shorter than recommended for HS256"
            );
        }

        let mut config = Self::new(secret.into_bytes());

        if let Ok(issuer) = env::var("APP_JWT_ISSUER") {
            if issuer.trim().is_empty() {
                return Err(AppError::config("APP_JWT_ISSUER must not be blank"));
            }
            config = config.with_issuer(issuer);
        }

        if let Ok(raw) = env::var("APP_TOKEN_TTL_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::config(format!("APP_TOKEN_TTL_SECS must be a whole number, got '{raw}'"))
            })?;
            config = config.with_token_ttl(Duration::from_secs(secs))?;
        }

        Ok(config)
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
