//! Gate for mutating routes.
//!
//! Wrap a scope with `RequireAuth` and every request reaching it must carry a
//! valid bearer token. Rejected requests never reach the handler; accepted ones
//! find an [`Identity`](crate::extractors::Identity) in their extensions.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::warn;

use crate::auth::gate::{self, GateOutcome};
use crate::state::SecurityConfig;

#[derive(Clone)]
pub struct RequireAuth {
    security: Arc<SecurityConfig>,
}

impl RequireAuth {
    pub fn new(security: Arc<SecurityConfig>) -> Self {
        Self { security }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service,
            security: Arc::clone(&self.security),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: S,
    security: Arc<SecurityConfig>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let outcome = gate::evaluate(
            req.headers()
                .get(header::AUTHORIZATION)
                .map(|value| value.as_bytes()),
            &self.security,
            SystemTime::now(),
        );

        match outcome {
            GateOutcome::Authorized(identity) => {
                req.extensions_mut().insert(identity);
                Box::pin(self.service.call(req))
            }
            GateOutcome::Rejected(reason) => {
                warn!(
                    code = %reason.code(),
                    method = %req.method(),
                    path = %req.path(),
                    "auth.rejected"
                );
                Box::pin(async move { Err(reason.into()) })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use super::*;
    use crate::auth::issuer::issue;
    use crate::config::principal::Principal;
    use crate::extractors::Identity;

    async fn whoami(identity: Identity) -> HttpResponse {
        HttpResponse::Ok().body(identity.claims().user_name.clone())
    }

    #[actix_web::test]
    async fn authorized_request_reaches_handler_with_identity() {
        let security = Arc::new(SecurityConfig::for_tests());
        let token = issue(&Principal::default(), &security).unwrap();
        let app = test::init_service(
            App::new()
                .wrap(RequireAuth::new(security.clone()))
                .route("/me", web::get().to(whoami)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "User1".as_bytes());
    }

    #[actix_web::test]
    async fn rejected_request_never_reaches_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let app = test::init_service(
            App::new()
                .wrap(RequireAuth::new(Arc::new(SecurityConfig::for_tests())))
                .route(
                    "/me",
                    web::get().to(move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                        async { HttpResponse::Ok().finish() }
                    }),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header((header::AUTHORIZATION, "Token abc123"))
            .to_request();
        let err = test::try_call_service(&app, req).await.unwrap_err();
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
