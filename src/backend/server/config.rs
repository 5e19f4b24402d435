/**
 * Server Configuration
 *
 * This module handles loading and validation of server configuration and
 * opening the SQLite connection pool.
 *
 * # Configuration Sources
 *
 * Configuration is read once at startup from environment variables (after
 * `.env` has been loaded) into an explicit `Config` value, which is then
 * handed to the token service and the database layer. Nothing reads the
 * environment after startup.
 *
 * | Key              | Default               | Notes                          |
 * |------------------|-----------------------|--------------------------------|
 * | `PORT`           | `5000`                |                                |
 * | `DATABASE_URL`   | `sqlite://social.db`  | `sqlite::memory:` for tests    |
 * | `JWT_SECRET_KEY` | -                     | required                       |
 * | `TOKEN_TTL_SECS` | unset (no expiry)     | at most 100 years              |
 * | `BCRYPT_COST`    | `10`                  | 4..=31                         |
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://social.db";
pub const DEFAULT_BCRYPT_COST: u32 = 10;
const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
/// Longest accepted token lifetime (100 years)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Process-wide settings, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen port
    pub port: u16,
    /// sqlx SQLite connection string
    pub database_url: String,
    /// HMAC secret for signing tokens
    pub jwt_secret: String,
    /// Token lifetime; `None` mints tokens without an `exp` claim
    pub token_ttl: Option<Duration>,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
}

impl Config {
    /// Create a new ConfigBuilder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut builder = Config::builder();

        if let Some(port) = get("PORT") {
            let port = port
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue { key: "PORT", value: port })?;
            builder = builder.port(port);
        }
        if let Some(url) = get("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = get("JWT_SECRET_KEY") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(ttl) = get("TOKEN_TTL_SECS") {
            let secs = ttl
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue { key: "TOKEN_TTL_SECS", value: ttl })?;
            builder = builder.token_ttl(Duration::from_secs(secs));
        }
        if let Some(cost) = get("BCRYPT_COST") {
            let parsed = cost
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidValue { key: "BCRYPT_COST", value: cost.clone() })?;
            builder = builder.bcrypt_cost(parsed);
        }

        builder.build()
    }

    /// True when the database lives only inside the process
    pub fn is_memory_database(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    port: Option<u16>,
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl: Option<Duration>,
    bcrypt_cost: Option<u32>,
}

impl ConfigBuilder {
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<Config, ConfigError> {
        let jwt_secret = self
            .jwt_secret
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingValue("JWT_SECRET_KEY"))?;

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        if let Some(ttl) = self.token_ttl {
            if ttl > MAX_TOKEN_TTL {
                return Err(ConfigError::InvalidValue {
                    key: "TOKEN_TTL_SECS",
                    value: ttl.as_secs().to_string(),
                });
            }
        }

        Ok(Config {
            port: self.port.unwrap_or(DEFAULT_PORT),
            database_url: self
                .database_url
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            token_ttl: self.token_ttl,
            bcrypt_cost,
        })
    }
}

/// Open the connection pool and apply migrations
///
/// File databases are created when missing. An in-memory database is bound
/// to a single connection that is never recycled, otherwise each new pool
/// connection would see an empty database.
pub async fn load_database(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if config.is_memory_database() {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(8)
    };

    tracing::info!("Connecting to database...");
    let pool = pool_options.connect_with(options).await?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
