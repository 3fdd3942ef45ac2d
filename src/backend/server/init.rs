/**
 * Server Initialization
 *
 * Builds the application from a configuration: open the database (running
 * migrations), construct the shared state, create the router.
 */

use axum::Router;
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, AppConfig, ConfigError};
use crate::backend::server::state::AppState;

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Create and configure the Axum application
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, StartupError> {
    tracing::info!("Initializing order service");

    let pool = connect_database(&config.database_url).await?;
    Ok(build_app(pool, config))
}

/// Build the router around an already opened pool
pub fn build_app(pool: SqlitePool, config: &AppConfig) -> Router<()> {
    let app_state = AppState::new(pool, config);
    tracing::info!(
        "Tokens signed with {:?}, access ttl {} min, refresh ttl {} days",
        config.tokens.algorithm,
        config.tokens.access_ttl.num_minutes(),
        config.tokens.refresh_ttl.num_days()
    );

    create_router(app_state)
}
