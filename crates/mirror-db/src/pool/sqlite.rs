//! SQLite connection pool management

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

/// Database configuration for connection pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// SQLite connection URL (`sqlite://mirror.db?mode=rwc`, `sqlite::memory:`)
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Maximum time to wait for a connection
    pub acquire_timeout: Duration,
    /// How long a writer waits on a locked database before failing
    pub busy_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("sqlite://mirror.db?mode=rwc"),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(10),
            busy_timeout: Duration::from_secs(5),
        }
    }
}

impl DatabaseConfig {
    /// Config pointing at the given URL with default pool settings
    pub fn new(url: impl Into<String>, max_connections: u32) -> Self {
        Self {
            url: url.into(),
            max_connections,
            ..Default::default()
        }
    }

    /// Private in-memory database, mostly for tests
    pub fn in_memory() -> Self {
        Self::new("sqlite::memory:", 1)
    }

    /// Every connection to `:memory:` opens its own empty database
    pub fn is_in_memory(&self) -> bool {
        self.url.contains(":memory:") || self.url.contains("mode=memory")
    }
}

/// Create a new SQLite connection pool
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .foreign_keys(true)
        .busy_timeout(config.busy_timeout);

    let mut pool = SqlitePoolOptions::new().acquire_timeout(config.acquire_timeout);

    pool = if config.is_in_memory() {
        // Pin a single connection that is never recycled, or the data vanishes
        pool.max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool.max_connections(config.max_connections)
    };

    pool.connect_with(options).await
}
