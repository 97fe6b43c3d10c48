//! CareVault Server — application entry point.

use axum::http::HeaderValue;
use carevault_auth::service::AccountService;
use carevault_db::{DbManager, SurrealAccountRepository};
use carevault_server::config::ServerConfig;
use carevault_server::{AppState, router};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("carevault=info".parse()?))
        .json()
        .init();

    let config = ServerConfig::from_env()?;

    let manager = DbManager::connect(&config.db).await?;
    carevault_db::run_migrations(manager.client()).await?;

    let repo = SurrealAccountRepository::new(manager.client().clone());
    let service = AccountService::new(repo, config.auth.clone());
    let state = AppState::new(service);

    let cors = if config.cors_origins == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .split(',')
            .map(|o| o.trim().parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()?;
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "CareVault server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
