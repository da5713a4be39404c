//! Database connection and management module
//!
//! This module provides the MySQL connection pool, its configuration, and the
//! `SchemaCatalog` seam the inspector and search engine talk to.

use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::info;

pub mod catalog;
pub mod mysql_catalog;
pub mod static_catalog;

pub use catalog::{CatalogResult, RawRow, SchemaCatalog};
pub use mysql_catalog::MySqlCatalog;
pub use static_catalog::{StaticCatalog, StaticDatabase, StaticTable};

/// Database configuration
///
/// The connection is never bound to `database`: every query is fully
/// qualified, so a scoped inspection of a missing database still leaves the
/// server able to reach the rest of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    /// Optional target database for the startup inspection
    pub database: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    pub const DEFAULT_PORT: u16 = 3306;
    pub const DEFAULT_POOL_SIZE: u32 = 5;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(host: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            user: user.into(),
            password: String::new(),
            database: None,
            max_connections: Self::DEFAULT_POOL_SIZE,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
            idle_timeout: Some(Duration::from_secs(600)), // 10 minutes
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
        }
    }

    /// Connection options for the pool
    pub fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
    }

    /// Connection URL with the password masked, safe to log
    pub fn display_url(&self) -> String {
        let password = if self.password.is_empty() { "" } else { ":****" };
        format!(
            "mysql://{}{}@{}:{}",
            self.user, password, self.host, self.port
        )
    }
}

/// Database connection manager
pub struct DatabaseManager {
    pool: MySqlPool,
}

impl DatabaseManager {
    /// Build the pool without opening a connection.
    ///
    /// Connectivity problems surface on first use (inspection, health, search)
    /// instead of preventing the HTTP listener from starting.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        info!("Configuring database pool: {}", config.display_url());

        let mut pool_options = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        if let Some(idle_timeout) = config.idle_timeout {
            pool_options = pool_options.idle_timeout(idle_timeout);
        }

        if let Some(max_lifetime) = config.max_lifetime {
            pool_options = pool_options.max_lifetime(max_lifetime);
        }

        let pool = pool_options.connect_lazy_with(config.connect_options());

        info!(
            "Database pool ready (max_connections={})",
            config.max_connections
        );

        Self { pool }
    }

    /// Catalog backed by this pool
    pub fn catalog(&self) -> MySqlCatalog {
        MySqlCatalog::new(self.pool.clone())
    }
}
