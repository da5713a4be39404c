//! Process configuration
//!
//! Reads config from env vars (a `.env` file is loaded by the binary first):
//!   DB_HOST                  - database host (required)
//!   DB_PORT                  - database port (default: 3306)
//!   DB_USER                  - database user (required)
//!   DB_PASSWORD              - database password (default: empty)
//!   DB_NAME                  - restrict startup inspection to one database
//!   DB_POOL_SIZE             - max pooled connections (default: 5)
//!   DB_ACQUIRE_TIMEOUT_SECS  - pool acquire timeout (default: 30)
//!   PORT                     - HTTP listen port (default: 3000)
//!   SEARCH_CANDIDATE_LIMIT   - rows per candidate table (default: 50)
//!   SEARCH_FALLBACK_LIMIT    - rows per fallback table (default: 25)
//!   VOCAB_WORD_COLUMNS, VOCAB_DEFINITION_COLUMNS, VOCAB_EXAMPLE_COLUMNS
//!                            - comma-separated vocabulary overrides

use std::str::FromStr;
use std::time::Duration;

use crate::database::DatabaseConfig;
use crate::error::ConfigError;
use crate::inspector::{ColumnRole, Vocabulary};
use crate::search::SearchLimits;

pub const DEFAULT_LISTEN_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub vocabulary: Vocabulary,
    pub limits: SearchLimits,
    pub listen_port: u16,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("DB_HOST").ok_or(ConfigError::MissingVar { name: "DB_HOST" })?;
        let user = get("DB_USER").ok_or(ConfigError::MissingVar { name: "DB_USER" })?;

        let mut database = DatabaseConfig::new(host, user);
        database.port = parse_or("DB_PORT", get("DB_PORT"), DatabaseConfig::DEFAULT_PORT)?;
        // Passwords are taken verbatim
        database.password = lookup("DB_PASSWORD").unwrap_or_default();
        database.database = get("DB_NAME");
        database.max_connections = parse_or(
            "DB_POOL_SIZE",
            get("DB_POOL_SIZE"),
            DatabaseConfig::DEFAULT_POOL_SIZE,
        )?;
        if database.max_connections == 0 {
            return Err(ConfigError::InvalidVar {
                name: "DB_POOL_SIZE",
                value: "0".to_string(),
                reason: "pool needs at least one connection".to_string(),
            });
        }
        database.acquire_timeout = Duration::from_secs(parse_or(
            "DB_ACQUIRE_TIMEOUT_SECS",
            get("DB_ACQUIRE_TIMEOUT_SECS"),
            DatabaseConfig::DEFAULT_ACQUIRE_TIMEOUT.as_secs(),
        )?);

        let defaults = SearchLimits::default();
        let limits = SearchLimits {
            candidate_rows: parse_or(
                "SEARCH_CANDIDATE_LIMIT",
                get("SEARCH_CANDIDATE_LIMIT"),
                defaults.candidate_rows,
            )?,
            fallback_rows: parse_or(
                "SEARCH_FALLBACK_LIMIT",
                get("SEARCH_FALLBACK_LIMIT"),
                defaults.fallback_rows,
            )?,
        };

        let mut vocabulary = Vocabulary::default();
        for (name, role) in [
            ("VOCAB_WORD_COLUMNS", ColumnRole::Word),
            ("VOCAB_DEFINITION_COLUMNS", ColumnRole::Definition),
            ("VOCAB_EXAMPLE_COLUMNS", ColumnRole::Example),
        ] {
            if let Some(list) = get(name) {
                vocabulary = vocabulary.with_list(role, list.split(','));
            }
        }
        if vocabulary.list(ColumnRole::Word).is_empty() {
            return Err(ConfigError::InvalidVar {
                name: "VOCAB_WORD_COLUMNS",
                value: get("VOCAB_WORD_COLUMNS").unwrap_or_default(),
                reason: "at least one word column name is required".to_string(),
            });
        }

        let listen_port = parse_or("PORT", get("PORT"), DEFAULT_LISTEN_PORT)?;

        Ok(Self {
            database,
            vocabulary,
            limits,
            listen_port,
        })
    }
}

fn parse_or<T>(name: &'static str, value: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
    }
}
