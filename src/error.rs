//! Error types for the vocabulary lookup backend
//!
//! Each concern gets its own thiserror enum: configuration problems are fatal
//! at startup, catalog problems stay local to the table or database they hit,
//! and lookup errors are the only ones that ever reach an HTTP client.

use thiserror::Error;

/// Configuration errors raised while reading the process environment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {name}")]
    MissingVar { name: &'static str },

    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidVar {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Errors from the schema catalog (introspection and row probes)
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Query failed on {database}.{table}: {message}")]
    Query {
        database: String,
        table: String,
        message: String,
    },
}

/// Request-level errors surfaced by the search engine
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no entries found for '{word}'")]
    NotFound { word: String },

    #[error("internal: {0}")]
    Internal(#[from] CatalogError),
}

impl LookupError {
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound { .. } => 404,
            Self::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_invalid_input() {
        assert_eq!(LookupError::InvalidInput("x".into()).http_status(), 400);
    }

    #[test]
    fn http_status_not_found() {
        let err = LookupError::NotFound {
            word: "apple".into(),
        };
        assert_eq!(err.http_status(), 404);
    }

    #[test]
    fn http_status_internal() {
        let err = LookupError::Internal(CatalogError::Unavailable("down".into()));
        assert_eq!(err.http_status(), 500);
    }

    #[test]
    fn catalog_query_error_names_the_table() {
        let err = CatalogError::Query {
            database: "lexicon".into(),
            table: "words".into(),
            message: "boom".into(),
        };
        assert_eq!(err.to_string(), "Query failed on lexicon.words: boom");
    }
}
