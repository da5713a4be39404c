//! In-memory schema catalog
//!
//! Serves a fixed set of databases, tables and rows with the same semantics
//! as `MySqlCatalog`: enumeration order is insertion order, probes compare
//! case-insensitively and honour the row limit. Individual tables can be made
//! to fail, and the whole catalog can be switched off to simulate a database
//! that cannot be reached.

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use super::catalog::{CatalogResult, RawRow, SchemaCatalog};
use crate::error::CatalogError;

/// One table: column names plus rows in insertion order
#[derive(Debug, Clone, Default)]
pub struct StaticTable {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl StaticTable {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; values are matched to columns by position.
    pub fn row<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<JsonValue>,
    {
        let mut row = RawRow::new();
        let mut values = values.into_iter();
        for column in &self.columns {
            let value = values.next().map(Into::into).unwrap_or(JsonValue::Null);
            row.insert(column.clone(), value);
        }
        self.rows.push(row);
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticDatabase {
    pub name: String,
    pub tables: Vec<StaticTable>,
}

impl StaticDatabase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn table(mut self, table: StaticTable) -> Self {
        self.tables.push(table);
        self
    }
}

#[derive(Debug, Clone)]
pub struct StaticCatalog {
    databases: Vec<StaticDatabase>,
    failing_probes: HashSet<(String, String)>,
    failing_describes: HashSet<(String, String)>,
    available: bool,
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            databases: Vec::new(),
            failing_probes: HashSet::new(),
            failing_describes: HashSet::new(),
            available: true,
        }
    }

    pub fn database(mut self, database: StaticDatabase) -> Self {
        self.databases.push(database);
        self
    }

    /// Make row probes against `database.table` fail
    pub fn fail_probe(mut self, database: &str, table: &str) -> Self {
        self.failing_probes
            .insert((database.to_string(), table.to_string()));
        self
    }

    /// Make column listing of `database.table` fail
    pub fn fail_describe(mut self, database: &str, table: &str) -> Self {
        self.failing_describes
            .insert((database.to_string(), table.to_string()));
        self
    }

    /// Every call fails as if the server were unreachable
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    fn ensure_available(&self) -> CatalogResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(CatalogError::Unavailable(
                "connection refused (static catalog offline)".to_string(),
            ))
        }
    }

    fn find_database(&self, database: &str) -> CatalogResult<&StaticDatabase> {
        self.databases
            .iter()
            .find(|db| db.name == database)
            .ok_or_else(|| CatalogError::Query {
                database: database.to_string(),
                table: String::new(),
                message: format!("Unknown database '{}'", database),
            })
    }

    fn find_table(&self, database: &str, table: &str) -> CatalogResult<&StaticTable> {
        self.find_database(database)?
            .tables
            .iter()
            .find(|t| t.name == table)
            .ok_or_else(|| query_error(database, table, "table doesn't exist"))
    }
}

fn query_error(database: &str, table: &str, message: &str) -> CatalogError {
    CatalogError::Query {
        database: database.to_string(),
        table: table.to_string(),
        message: message.to_string(),
    }
}

/// Render a cell the way `LOWER(col)` sees it
fn cell_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl SchemaCatalog for StaticCatalog {
    async fn list_databases(&self) -> CatalogResult<Vec<String>> {
        self.ensure_available()?;
        Ok(self.databases.iter().map(|db| db.name.clone()).collect())
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        self.ensure_available()?;
        let db = self.find_database(database)?;
        Ok(db.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn list_columns(&self, database: &str, table: &str) -> CatalogResult<Vec<String>> {
        self.ensure_available()?;
        if self
            .failing_describes
            .contains(&(database.to_string(), table.to_string()))
        {
            return Err(query_error(database, table, "describe failed"));
        }
        Ok(self.find_table(database, table)?.columns.clone())
    }

    async fn find_rows(
        &self,
        database: &str,
        table: &str,
        column: &str,
        word: &str,
        limit: u32,
    ) -> CatalogResult<Vec<RawRow>> {
        self.ensure_available()?;
        if self
            .failing_probes
            .contains(&(database.to_string(), table.to_string()))
        {
            return Err(query_error(database, table, "probe failed"));
        }

        let source = self.find_table(database, table)?;
        let key = source
            .columns
            .iter()
            .find(|c| c.eq_ignore_ascii_case(column))
            .ok_or_else(|| query_error(database, table, "unknown column"))?;
        let needle = word.to_lowercase();

        Ok(source
            .rows
            .iter()
            .filter(|row| {
                row.get(key)
                    .and_then(cell_text)
                    .is_some_and(|text| text.to_lowercase() == needle)
            })
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> CatalogResult<()> {
        self.ensure_available()
    }
}
