use std::sync::Arc;
use std::time::Duration;

use crm_core_postgres::repository::db_init::run_migrations;
use crm_core_server::{create_router, AppState, ServerConfig};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let pool = connect_with_retry(&config).await?;
    run_migrations(&pool).await?;
    info!("Database migrations applied");

    let address = config.bind_address();
    let app = create_router(AppState::new(Arc::new(pool), config));
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "CRM server listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("Server stopped");
    Ok(())
}

async fn connect_with_retry(config: &ServerConfig) -> Result<PgPool, sqlx::Error> {
    let mut attempt = 0;
    loop {
        attempt += 1;
        let result = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await;
        match result {
            Ok(pool) => {
                info!(attempt, "Connected to database");
                return Ok(pool);
            }
            Err(e) if attempt <= config.db_connect_retries => {
                warn!(attempt, retries = config.db_connect_retries, "Database connection failed: {e}");
                tokio::time::sleep(Duration::from_millis(config.db_connect_retry_delay_ms)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
