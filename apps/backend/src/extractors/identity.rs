use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::PrincipalClaims;
use crate::auth::error::AuthError;

/// Authenticated identity for the current request.
///
/// Inserted into request extensions by the `RequireAuth` middleware and lives
/// only as long as the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    claims: PrincipalClaims,
}

impl Identity {
    pub fn new(claims: PrincipalClaims) -> Self {
        Self { claims }
    }

    pub fn claims(&self) -> &PrincipalClaims {
        &self.claims
    }

    pub fn user_id(&self) -> i64 {
        self.claims.user_id
    }

    pub fn role(&self) -> &str {
        &self.claims.role
    }
}

impl FromRequest for Identity {
    type Error = AuthError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Only present when the route is wrapped by RequireAuth.
        ready(
            req.extensions()
                .get::<Identity>()
                .cloned()
                .ok_or(AuthError::MissingCredential),
        )
    }
}
