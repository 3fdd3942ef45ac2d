//! Database and application fixtures
//!
//! Every test gets its own in-memory database, migrated and wrapped in a
//! `TestServer` running the full router.

use axum_test::TestServer;
use sqlx::SqlitePool;

use orderflow::backend::auth::sessions::TokenService;
use orderflow::backend::server::{build_app, connect_database, AppConfig};

pub const TEST_SECRET: &str = "integration-test-secret";

/// A running application and handles on its internals
pub struct TestApp {
    pub server: TestServer,
    pub pool: SqlitePool,
    pub config: AppConfig,
}

impl TestApp {
    /// Token service sharing the application's key and algorithm
    pub fn tokens(&self) -> TokenService {
        TokenService::new(&self.config.tokens)
    }
}

/// Configuration used by every test: fixed secret, cheapest bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("sqlite::memory:")
        .secret(TEST_SECRET)
        .password_hash_cost(4)
        .build()
        .expect("test config")
}

/// Start the application on a fresh in-memory database
pub async fn spawn_app() -> TestApp {
    let config = test_config();
    let pool = connect_database(&config.database_url)
        .await
        .expect("in-memory database");
    let server = TestServer::new(build_app(pool.clone(), &config)).expect("test server");

    TestApp { server, pool, config }
}
