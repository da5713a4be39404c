//! Schema inspection
//!
//! Walks the catalog once at startup and records every table that looks like
//! it holds lexical entries. The same traversal, in loose mode, backs the
//! search engine's fallback phase.
//!
//! A table is a candidate when one of its columns is in the word vocabulary
//! and (strict mode only) at least one other column is in the definition or
//! example vocabulary. Failures on a single database or table are logged and
//! skipped; only a failure to list databases at all ends the walk early.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::database::{CatalogResult, SchemaCatalog};

pub mod vocabulary;

pub use vocabulary::{ColumnRole, Vocabulary};

/// Schemas that belong to the server itself
pub const SYSTEM_SCHEMAS: &[&str] = &["information_schema", "mysql", "performance_schema", "sys"];

pub fn is_system_schema(name: &str) -> bool {
    SYSTEM_SCHEMAS
        .iter()
        .any(|system| system.eq_ignore_ascii_case(name))
}

/// How picky the traversal is about a table's columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Word column plus a definition or example column
    Strict,
    /// Any word column
    Loose,
}

/// A table identified as plausibly containing lexical entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateTable {
    pub database: String,
    pub table: String,
    pub word_column: String,
    pub definition_columns: Vec<String>,
    pub example_columns: Vec<String>,
    pub all_columns: BTreeSet<String>,
}

impl CandidateTable {
    /// `database.table`
    pub fn source(&self) -> String {
        format!("{}.{}", self.database, self.table)
    }
}

/// Startup snapshot of the schema; immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InspectionSummary {
    pub databases: Vec<String>,
    pub candidates: Vec<CandidateTable>,
}

impl InspectionSummary {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Decide whether one table qualifies, given its raw column names
pub fn classify_table(
    database: &str,
    table: &str,
    columns: &[String],
    vocabulary: &Vocabulary,
    mode: ScanMode,
) -> Option<CandidateTable> {
    let all_columns: BTreeSet<String> = columns.iter().map(|c| c.to_lowercase()).collect();

    let word_column = vocabulary.word_column(&all_columns)?;
    let definition_columns = vocabulary.matching(ColumnRole::Definition, &all_columns);
    let example_columns = vocabulary.matching(ColumnRole::Example, &all_columns);

    if mode == ScanMode::Strict && definition_columns.is_empty() && example_columns.is_empty() {
        return None;
    }

    Some(CandidateTable {
        database: database.to_string(),
        table: table.to_string(),
        word_column,
        definition_columns,
        example_columns,
        all_columns,
    })
}

/// Every database on the server except the system schemas, in catalog order
pub async fn list_user_databases(catalog: &dyn SchemaCatalog) -> CatalogResult<Vec<String>> {
    Ok(catalog
        .list_databases()
        .await?
        .into_iter()
        .filter(|name| !is_system_schema(name))
        .collect())
}

/// Walk `databases` and collect the tables that qualify under `mode`
pub async fn scan_tables(
    catalog: &dyn SchemaCatalog,
    vocabulary: &Vocabulary,
    databases: &[String],
    mode: ScanMode,
) -> Vec<CandidateTable> {
    let mut found = Vec::new();

    for database in databases {
        let tables = match catalog.list_tables(database).await {
            Ok(tables) => tables,
            Err(e) => {
                warn!("Skipping database {}: failed to list tables: {}", database, e);
                continue;
            }
        };

        for table in tables {
            let columns = match catalog.list_columns(database, &table).await {
                Ok(columns) => columns,
                Err(e) => {
                    warn!("Skipping table {}.{}: {}", database, table, e);
                    continue;
                }
            };

            if let Some(candidate) = classify_table(database, &table, &columns, vocabulary, mode) {
                debug!(
                    "{} qualifies ({:?}): word={} definitions={:?} examples={:?}",
                    candidate.source(),
                    mode,
                    candidate.word_column,
                    candidate.definition_columns,
                    candidate.example_columns
                );
                found.push(candidate);
            }
        }
    }

    found
}

/// Build the startup snapshot.
///
/// Fails open: if the catalog cannot even list databases, the error is logged
/// and an empty summary is returned so the server can still start.
pub async fn inspect(
    catalog: &dyn SchemaCatalog,
    vocabulary: &Vocabulary,
    target_database: Option<&str>,
) -> InspectionSummary {
    let mut databases = match list_user_databases(catalog).await {
        Ok(databases) => databases,
        Err(e) => {
            warn!("Schema inspection failed, continuing without candidates: {}", e);
            return InspectionSummary::default();
        }
    };

    if let Some(target) = target_database {
        databases.retain(|name| name == target);
        if databases.is_empty() {
            warn!("Target database '{}' not found; no tables inspected", target);
        }
    }

    let candidates = scan_tables(catalog, vocabulary, &databases, ScanMode::Strict).await;

    info!(
        "Schema inspection complete: {} database(s), {} candidate table(s)",
        databases.len(),
        candidates.len()
    );
    for candidate in &candidates {
        info!("  candidate {} (word column: {})", candidate.source(), candidate.word_column);
    }

    InspectionSummary {
        databases,
        candidates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{StaticCatalog, StaticDatabase, StaticTable};

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    fn sample_catalog() -> StaticCatalog {
        StaticCatalog::new()
            .database(StaticDatabase::new("information_schema").table(StaticTable::new(
                "COLUMNS",
                &["name", "description"],
            )))
            .database(
                StaticDatabase::new("lexicon")
                    .table(StaticTable::new("words", &["id", "Word", "Definition"]))
                    .table(StaticTable::new("users", &["id", "name", "email"]))
                    .table(StaticTable::new("phrases", &["term", "usage"])),
            )
            .database(
                StaticDatabase::new("shop").table(StaticTable::new(
                    "products",
                    &["name", "description", "price"],
                )),
            )
    }

    #[test]
    fn classify_requires_definition_or_example_in_strict_mode() {
        let vocab = Vocabulary::default();
        assert!(classify_table("db", "users", &cols(&["name", "email"]), &vocab, ScanMode::Strict)
            .is_none());
        assert!(classify_table("db", "users", &cols(&["name", "email"]), &vocab, ScanMode::Loose)
            .is_some());
    }

    #[test]
    fn classify_lowercases_and_orders_columns() {
        let vocab = Vocabulary::default();
        let candidate = classify_table(
            "db",
            "entries",
            &cols(&["Name", "HEADWORD", "Gloss", "Definition", "Example"]),
            &vocab,
            ScanMode::Strict,
        )
        .unwrap();
        assert_eq!(candidate.word_column, "headword");
        assert_eq!(candidate.definition_columns, vec!["definition", "gloss"]);
        assert_eq!(candidate.example_columns, vec!["example"]);
        assert!(candidate.all_columns.contains("name"));
    }

    #[test]
    fn classify_without_word_column_is_none_in_both_modes() {
        let vocab = Vocabulary::default();
        let columns = cols(&["id", "definition"]);
        assert!(classify_table("db", "t", &columns, &vocab, ScanMode::Strict).is_none());
        assert!(classify_table("db", "t", &columns, &vocab, ScanMode::Loose).is_none());
    }

    #[test]
    fn system_schemas_are_case_insensitive() {
        assert!(is_system_schema("INFORMATION_SCHEMA"));
        assert!(is_system_schema("sys"));
        assert!(!is_system_schema("lexicon"));
    }

    #[tokio::test]
    async fn inspect_skips_system_schemas_and_keeps_catalog_order() {
        let catalog = sample_catalog();
        let summary = inspect(&catalog, &Vocabulary::default(), None).await;

        assert_eq!(summary.databases, vec!["lexicon", "shop"]);
        let sources: Vec<String> = summary.candidates.iter().map(|c| c.source()).collect();
        assert_eq!(
            sources,
            vec!["lexicon.words", "lexicon.phrases", "shop.products"]
        );
    }

    #[tokio::test]
    async fn inspect_restricts_to_target_database() {
        let catalog = sample_catalog();
        let summary = inspect(&catalog, &Vocabulary::default(), Some("shop")).await;

        assert_eq!(summary.databases, vec!["shop"]);
        assert_eq!(summary.candidates.len(), 1);
        assert_eq!(summary.candidates[0].table, "products");
    }

    #[tokio::test]
    async fn inspect_with_missing_target_is_empty() {
        let catalog = sample_catalog();
        let summary = inspect(&catalog, &Vocabulary::default(), Some("nope")).await;
        assert!(summary.databases.is_empty());
        assert!(summary.is_empty());
    }

    #[tokio::test]
    async fn inspect_skips_tables_that_fail_to_describe() {
        let catalog = sample_catalog().fail_describe("lexicon", "words");
        let summary = inspect(&catalog, &Vocabulary::default(), None).await;
        let sources: Vec<String> = summary.candidates.iter().map(|c| c.source()).collect();
        assert_eq!(sources, vec!["lexicon.phrases", "shop.products"]);
    }

    #[tokio::test]
    async fn inspect_fails_open_when_unreachable() {
        let catalog = sample_catalog().unavailable();
        let summary = inspect(&catalog, &Vocabulary::default(), None).await;
        assert_eq!(summary, InspectionSummary::default());
    }

    #[tokio::test]
    async fn alternate_vocabulary_changes_candidates() {
        let catalog = StaticCatalog::new().database(
            StaticDatabase::new("glossary")
                .table(StaticTable::new("vocables", &["vocable", "explication"])),
        );
        let vocab = Vocabulary::new(["vocable"], ["explication"], Vec::<String>::new());

        let summary = inspect(&catalog, &vocab, None).await;
        assert_eq!(summary.candidates.len(), 1);
        assert_eq!(summary.candidates[0].word_column, "vocable");

        let default_summary = inspect(&catalog, &Vocabulary::default(), None).await;
        assert!(default_summary.is_empty());
    }

    #[tokio::test]
    async fn loose_scan_accepts_word_only_tables() {
        let catalog = sample_catalog();
        let databases = list_user_databases(&catalog).await.unwrap();
        let loose = scan_tables(&catalog, &Vocabulary::default(), &databases, ScanMode::Loose).await;
        assert!(loose.iter().any(|c| c.source() == "lexicon.users"));
    }
}
