/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read from environment variables (a `.env` file is loaded
 * by the binary before this runs). Everything except `SECRET_KEY` has a
 * default suitable for local development:
 *
 * | Variable                      | Default                       |
 * |-------------------------------|-------------------------------|
 * | `DATABASE_URL`                | `sqlite://orders.db?mode=rwc` |
 * | `SECRET_KEY`                  | required                      |
 * | `ALGORITHM`                   | `HS256`                       |
 * | `ACCESS_TOKEN_EXPIRE_MINUTES` | `30`                          |
 * | `REFRESH_TOKEN_EXPIRE_DAYS`   | `7`                           |
 * | `SERVER_PORT`                 | `3000`                        |
 * | `PASSWORD_HASH_COST`          | bcrypt `DEFAULT_COST`         |
 */

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::sessions::TokenConfig;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db?mode=rwc";
pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 30;
pub const DEFAULT_REFRESH_TOKEN_EXPIRE_DAYS: i64 = 7;
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("unsupported signing algorithm {0:?}, expected HS256, HS384 or HS512")]
    UnsupportedAlgorithm(Algorithm),
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// sqlx SQLite connection URL
    pub database_url: String,
    /// Port the HTTP server listens on
    pub server_port: u16,
    /// Token signing configuration
    pub tokens: TokenConfig,
    /// bcrypt cost used when hashing new passwords
    pub password_hash_cost: u32,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("SECRET_KEY") {
            builder = builder.secret(secret);
        }
        if let Some(name) = lookup("ALGORITHM") {
            let algorithm = Algorithm::from_str(name.trim()).map_err(|_| ConfigError::InvalidValue {
                name: "ALGORITHM",
                value: name.clone(),
            })?;
            builder = builder.algorithm(algorithm);
        }
        if let Some(value) = lookup("ACCESS_TOKEN_EXPIRE_MINUTES") {
            builder = builder.access_ttl(Duration::minutes(parse_var("ACCESS_TOKEN_EXPIRE_MINUTES", &value)?));
        }
        if let Some(value) = lookup("REFRESH_TOKEN_EXPIRE_DAYS") {
            builder = builder.refresh_ttl(Duration::days(parse_var("REFRESH_TOKEN_EXPIRE_DAYS", &value)?));
        }
        if let Some(value) = lookup("SERVER_PORT") {
            builder = builder.server_port(parse_var("SERVER_PORT", &value)?);
        }
        if let Some(value) = lookup("PASSWORD_HASH_COST") {
            builder = builder.password_hash_cost(parse_var("PASSWORD_HASH_COST", &value)?);
        }

        builder.build()
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    server_port: Option<u16>,
    secret: Option<String>,
    algorithm: Option<Algorithm>,
    access_ttl: Option<Duration>,
    refresh_ttl: Option<Duration>,
    password_hash_cost: Option<u32>,
}

impl AppConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn server_port(mut self, port: u16) -> Self {
        self.server_port = Some(port);
        self
    }

    /// Set the token signing secret
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = Some(ttl);
        self
    }

    pub fn refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = Some(ttl);
        self
    }

    pub fn password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = Some(cost);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let secret = self
            .secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("SECRET_KEY"))?;

        let algorithm = self.algorithm.unwrap_or(Algorithm::HS256);
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(ConfigError::UnsupportedAlgorithm(algorithm));
        }

        let password_hash_cost = self.password_hash_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&password_hash_cost) {
            return Err(ConfigError::InvalidValue {
                name: "PASSWORD_HASH_COST",
                value: password_hash_cost.to_string(),
            });
        }

        Ok(AppConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            server_port: self.server_port.unwrap_or(DEFAULT_SERVER_PORT),
            tokens: TokenConfig {
                secret,
                algorithm,
                access_ttl: self
                    .access_ttl
                    .unwrap_or_else(|| Duration::minutes(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES)),
                refresh_ttl: self
                    .refresh_ttl
                    .unwrap_or_else(|| Duration::days(DEFAULT_REFRESH_TOKEN_EXPIRE_DAYS)),
            },
            password_hash_cost,
        })
    }
}

/// Open the connection pool and run migrations
///
/// The database file is created if it does not exist. In-memory databases
/// live only as long as their connection, so they are pinned to a single
/// connection that is never recycled.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool_options = if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}
