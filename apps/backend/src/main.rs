use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use bookshelf::config::{DbKind, ServerConfig};
use bookshelf::infra::state::build_state;
use bookshelf::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use bookshelf::routes;
use bookshelf::state::SecurityConfig;
use bookshelf::telemetry;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Configuration comes from the process environment only.
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "invalid security configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(DbKind::Postgres)
        .with_security(security)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    let security: Arc<SecurityConfig> = Arc::clone(&app_state.security);
    let data = web::Data::new(app_state);

    info!(host = %server.host, port = server.port, "starting bookshelf backend");

    HttpServer::new(move || {
        App::new()
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(|cfg| routes::configure(cfg, &security))
    })
    .bind(server.bind_addr())?
    .run()
    .await
}
