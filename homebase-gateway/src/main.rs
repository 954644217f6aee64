//! Entry point for the `homebase-gateway` HTTP server.

use std::sync::Arc;

use homebase_gateway::{
    config::GatewayConfig, context::AppContext, routes::create_router,
    validation::SchemaValidator,
};
use homebase_store::SqliteStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match GatewayConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let validator = match SchemaValidator::load(config.schema_dir.as_deref()) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, "failed to compile schemas");
            std::process::exit(1);
        }
    };
    info!(schemas = ?validator.names().collect::<Vec<_>>(), "schemas compiled");

    let store = match SqliteStore::open(&config.db_path) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(path = %config.db_path.display(), error = %e, "failed to open database");
            std::process::exit(1);
        }
    };
    info!(path = %config.db_path.display(), "database opened");

    let ctx = AppContext::new(Arc::new(store), Arc::new(validator));
    let app = create_router(ctx);

    let addr = config.listen_addr;
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };

    info!(addr = %addr, "homebase-gateway listening");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
}
