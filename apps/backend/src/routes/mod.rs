use std::sync::Arc;

use actix_web::{guard, web};

use crate::middleware::RequireAuth;
use crate::state::SecurityConfig;

pub mod books;
pub mod health;

/// Register every route. Mutating book routes sit in a scope guarded by
/// method and wrapped with `RequireAuth`; reads and health stay public.
///
/// Used by `main` and by the integration tests so both see the same table.
pub fn configure(cfg: &mut web::ServiceConfig, security: &Arc<SecurityConfig>) {
    cfg.service(web::scope("/health").configure(health::configure_routes));

    cfg.service(
        web::scope("/books")
            .guard(
                guard::Any(guard::Post())
                    .or(guard::Put())
                    .or(guard::Delete()),
            )
            .wrap(RequireAuth::new(Arc::clone(security)))
            .configure(books::configure_protected),
    );
    cfg.service(web::scope("/books").configure(books::configure_public));
}
