//! Main entry point for the events backend.
//!
//! Initializes logging, opens the database (applying migrations), creates the
//! bootstrap admin when configured, and serves the API.

use anyhow::Result;
use events_backend::api;
use events_backend::config::Config;
use events_backend::database::Database;
use events_backend::services::user_service::UserService;
use events_backend::utils::jwt::JwtUtils;
use tracing::info;
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> Result<()> {
    init();

    let config = Config::from_env()?;
    let db = Database::new(&config).await?;
    let pool = db.pool().clone();

    if let Some(admin) = &config.bootstrap_admin {
        UserService::new(&pool).ensure_bootstrap_admin(admin).await?;
    }

    let app = api::app(pool, JwtUtils::from_config(&config));

    let bind_address = format!("0.0.0.0:{}", config.server_port);
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    info!("Starting events server on port {}", config.server_port);
    axum::serve(listener, app).await?;

    db.close().await;
    Ok(())
}
