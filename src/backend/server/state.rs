/**
 * Application State Management
 *
 * `AppState` is the state shared by every handler: the connection pool,
 * the token service and the password hashing cost. `FromRef` implementations
 * let handlers extract just the part they need.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::backend::auth::sessions::TokenService;
use crate::backend::server::config::AppConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool; each request opens one session transaction on it
    pub db_pool: SqlitePool,

    /// Token issuance and verification
    pub tokens: Arc<TokenService>,

    /// bcrypt cost for new password hashes
    pub password_hash_cost: u32,
}

impl AppState {
    pub fn new(db_pool: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db_pool,
            tokens: Arc::new(TokenService::new(&config.tokens)),
            password_hash_cost: config.password_hash_cost,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}
