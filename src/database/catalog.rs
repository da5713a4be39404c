//! SchemaCatalog trait definition.
//!
//! The catalog abstracts the handful of database operations the inspector and
//! the search engine need: enumerate databases, tables and columns, probe a
//! table for a word, and check liveness. `MySqlCatalog` talks to a real
//! server; `StaticCatalog` serves an in-memory schema for tests and demos.

use async_trait::async_trait;

use crate::error::CatalogError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// A row of unknown shape: column name to JSON value, in select order.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

#[async_trait]
pub trait SchemaCatalog: Send + Sync {
    /// List every database visible to the connection, system schemas included.
    async fn list_databases(&self) -> CatalogResult<Vec<String>>;

    /// List the tables of one database.
    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>>;

    /// Column names of one table, as the server reports them.
    async fn list_columns(&self, database: &str, table: &str) -> CatalogResult<Vec<String>>;

    /// Rows whose `column` equals `word` case-insensitively, at most `limit`.
    async fn find_rows(
        &self,
        database: &str,
        table: &str,
        column: &str,
        word: &str,
        limit: u32,
    ) -> CatalogResult<Vec<RawRow>>;

    /// Trivial liveness query.
    async fn ping(&self) -> CatalogResult<()>;
}
