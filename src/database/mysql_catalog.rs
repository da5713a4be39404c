//! MySQL-backed schema catalog
//!
//! Catalog listings use `SHOW` statements over the text protocol (MySQL does
//! not accept all of them as prepared statements) and keep the server's
//! enumeration order. Row probes are prepared statements with the word bound
//! as a parameter; identifiers are backtick-quoted.

use async_trait::async_trait;
use serde_json::{json, Value as JsonValue};
use sqlx::mysql::{MySqlPool, MySqlRow};
use sqlx::{Column, Executor, Row, TypeInfo};
use tracing::{debug, warn};

use super::catalog::{CatalogResult, RawRow, SchemaCatalog};

/// Catalog over a pooled MySQL connection
#[derive(Clone)]
pub struct MySqlCatalog {
    pool: MySqlPool,
}

impl MySqlCatalog {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SchemaCatalog for MySqlCatalog {
    async fn list_databases(&self) -> CatalogResult<Vec<String>> {
        let rows = (&self.pool).fetch_all("SHOW DATABASES").await?;
        Ok(listing_names(&rows, "the server"))
    }

    async fn list_tables(&self, database: &str) -> CatalogResult<Vec<String>> {
        let sql = format!("SHOW TABLES FROM {}", quote_ident(database));
        let rows = (&self.pool).fetch_all(sql.as_str()).await?;
        Ok(listing_names(&rows, database))
    }

    async fn list_columns(&self, database: &str, table: &str) -> CatalogResult<Vec<String>> {
        let sql = format!(
            "SHOW COLUMNS FROM {}.{}",
            quote_ident(database),
            quote_ident(table)
        );
        let rows = (&self.pool).fetch_all(sql.as_str()).await?;
        // First column of SHOW COLUMNS is `Field`
        Ok(listing_names(&rows, &format!("{}.{}", database, table)))
    }

    async fn find_rows(
        &self,
        database: &str,
        table: &str,
        column: &str,
        word: &str,
        limit: u32,
    ) -> CatalogResult<Vec<RawRow>> {
        let sql = probe_sql(database, table, column, limit);
        debug!("Probing {}.{}.{} (limit {})", database, table, column, limit);

        let rows = sqlx::query(&sql).bind(word).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(row_to_json).collect())
    }

    async fn ping(&self) -> CatalogResult<()> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}

/// Backtick-quote a MySQL identifier
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Case-insensitive equality probe against one column
pub fn probe_sql(database: &str, table: &str, column: &str, limit: u32) -> String {
    format!(
        "SELECT * FROM {}.{} WHERE LOWER({}) = LOWER(?) LIMIT {}",
        quote_ident(database),
        quote_ident(table),
        quote_ident(column),
        limit
    )
}

/// First-column names of a SHOW listing; undecodable entries are skipped
fn listing_names(rows: &[MySqlRow], listing: &str) -> Vec<String> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let name = listing_name(
                row.try_get::<String, _>(0).ok(),
                row.try_get::<Vec<u8>, _>(0).ok(),
            );
            if name.is_none() {
                warn!("Skipping undecodable entry #{} in listing of {}", index, listing);
            }
            name
        })
        .collect()
}

/// Listing columns are VARCHAR on most servers but VARBINARY on some
fn listing_name(text: Option<String>, raw: Option<Vec<u8>>) -> Option<String> {
    text.or_else(|| raw.map(|bytes| String::from_utf8_lossy(&bytes).into_owned()))
        .filter(|name| !name.is_empty())
}

/// Convert a database row to an ordered JSON map
fn row_to_json(row: &MySqlRow) -> RawRow {
    let mut map = RawRow::new();

    for column in row.columns() {
        let name = column.name();
        let ordinal = column.ordinal();
        let type_name = column.type_info().name();

        let value: Option<JsonValue> = match type_name {
            "BOOLEAN" => row
                .try_get::<Option<bool>, _>(ordinal)
                .ok()
                .flatten()
                .map(|b| json!(b)),
            "TINYINT" | "SMALLINT" | "MEDIUMINT" | "INT" | "BIGINT" => row
                .try_get::<Option<i64>, _>(ordinal)
                .ok()
                .flatten()
                .map(|i| json!(i)),
            "TINYINT UNSIGNED" | "SMALLINT UNSIGNED" | "MEDIUMINT UNSIGNED" | "INT UNSIGNED"
            | "BIGINT UNSIGNED" => row
                .try_get::<Option<u64>, _>(ordinal)
                .ok()
                .flatten()
                .map(|i| json!(i)),
            "YEAR" => row
                .try_get::<Option<u16>, _>(ordinal)
                .ok()
                .flatten()
                .map(|y| json!(y)),
            "BIT" => row
                .try_get::<Option<u64>, _>(ordinal)
                .ok()
                .flatten()
                .map(|b| json!(b)),
            "FLOAT" => row
                .try_get::<Option<f32>, _>(ordinal)
                .ok()
                .flatten()
                .map(|f| json!(f64::from(f))),
            "DOUBLE" => row
                .try_get::<Option<f64>, _>(ordinal)
                .ok()
                .flatten()
                .map(|f| json!(f)),
            "DECIMAL" => row
                .try_get::<Option<rust_decimal::Decimal>, _>(ordinal)
                .ok()
                .flatten()
                .map(|d| json!(d.to_string())),
            "JSON" => row
                .try_get::<Option<JsonValue>, _>(ordinal)
                .ok()
                .flatten(),
            "DATETIME" | "TIMESTAMP" => row
                .try_get::<Option<chrono::NaiveDateTime>, _>(ordinal)
                .ok()
                .flatten()
                .map(|dt| json!(dt.to_string())),
            "DATE" => row
                .try_get::<Option<chrono::NaiveDate>, _>(ordinal)
                .ok()
                .flatten()
                .map(|d| json!(d.to_string())),
            "TIME" => row
                .try_get::<Option<chrono::NaiveTime>, _>(ordinal)
                .ok()
                .flatten()
                .map(|t| json!(t.to_string())),
            _ => text_value(row, ordinal),
        };

        map.insert(name.to_string(), value.unwrap_or(JsonValue::Null));
    }

    map
}

/// Text-like and unknown column types
fn text_value(row: &MySqlRow, ordinal: usize) -> Option<JsonValue> {
    if let Ok(text) = row.try_get::<Option<String>, _>(ordinal) {
        return text.map(JsonValue::String);
    }
    row.try_get::<Option<Vec<u8>>, _>(ordinal)
        .ok()
        .flatten()
        .map(|bytes| JsonValue::String(String::from_utf8_lossy(&bytes).into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_ident_escapes_backticks() {
        assert_eq!(quote_ident("words"), "`words`");
        assert_eq!(quote_ident("odd`name"), "`odd``name`");
    }

    #[test]
    fn listing_name_prefers_text_then_bytes() {
        assert_eq!(
            listing_name(Some("lexicon".into()), None).as_deref(),
            Some("lexicon")
        );
        assert_eq!(
            listing_name(None, Some(b"words".to_vec())).as_deref(),
            Some("words")
        );
    }

    #[test]
    fn listing_name_skips_undecodable_or_empty() {
        assert_eq!(listing_name(None, None), None);
        assert_eq!(listing_name(Some(String::new()), None), None);
    }

    #[test]
    fn probe_sql_is_fully_qualified() {
        assert_eq!(
            probe_sql("lexicon", "words", "word", 50),
            "SELECT * FROM `lexicon`.`words` WHERE LOWER(`word`) = LOWER(?) LIMIT 50"
        );
    }
}
