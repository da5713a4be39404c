//! Word search over the discovered lexical tables
//!
//! Two phases:
//! 1. Candidate phase - probe every table from the startup snapshot
//! 2. Fallback phase - only when phase 1 found nothing, rescan the whole
//!    server loosely (any word column) and probe everything it finds
//!
//! Results keep discovery order; there is no ranking or deduplication.
//! A table whose probe fails is logged and skipped.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::database::SchemaCatalog;
use crate::error::{CatalogError, LookupError};
use crate::inspector::{
    list_user_databases, scan_tables, CandidateTable, InspectionSummary, ScanMode, Vocabulary,
};

pub mod result;

pub use result::SearchResult;

/// Row caps per probed table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub candidate_rows: u32,
    pub fallback_rows: u32,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            candidate_rows: 50,
            fallback_rows: 25,
        }
    }
}

/// Search engine over an immutable inspection snapshot
pub struct SearchEngine {
    catalog: Arc<dyn SchemaCatalog>,
    summary: Arc<InspectionSummary>,
    vocabulary: Arc<Vocabulary>,
    limits: SearchLimits,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<dyn SchemaCatalog>,
        summary: Arc<InspectionSummary>,
        vocabulary: Arc<Vocabulary>,
        limits: SearchLimits,
    ) -> Self {
        Self {
            catalog,
            summary,
            vocabulary,
            limits,
        }
    }

    pub fn summary(&self) -> &InspectionSummary {
        &self.summary
    }

    /// Look up `word` across every discovered table.
    ///
    /// Returns `NotFound` when nothing matched, `Internal` only when the
    /// fallback phase cannot enumerate databases at all.
    pub async fn search(&self, word: &str) -> Result<Vec<SearchResult>, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::InvalidInput(
                "search word must not be blank".to_string(),
            ));
        }

        let mut results = self.candidate_phase(word).await;

        if results.is_empty() {
            info!(
                "No candidate-table match for '{}', running fallback scan",
                word
            );
            results = self.fallback_phase(word).await?;
        }

        if results.is_empty() {
            return Err(LookupError::NotFound {
                word: word.to_string(),
            });
        }

        debug!("'{}' matched {} row(s)", word, results.len());
        Ok(results)
    }

    async fn candidate_phase(&self, word: &str) -> Vec<SearchResult> {
        let mut results = Vec::new();
        for table in &self.summary.candidates {
            results.extend(self.probe(table, word, self.limits.candidate_rows).await);
        }
        results
    }

    /// Fresh loose scan of every user database, ignoring the snapshot and any
    /// configured target database
    async fn fallback_phase(&self, word: &str) -> Result<Vec<SearchResult>, CatalogError> {
        let databases = list_user_databases(self.catalog.as_ref()).await?;
        let tables = scan_tables(
            self.catalog.as_ref(),
            &self.vocabulary,
            &databases,
            ScanMode::Loose,
        )
        .await;

        let mut results = Vec::new();
        for table in &tables {
            results.extend(self.probe(table, word, self.limits.fallback_rows).await);
        }
        Ok(results)
    }

    async fn probe(&self, table: &CandidateTable, word: &str, limit: u32) -> Vec<SearchResult> {
        match self
            .catalog
            .find_rows(&table.database, &table.table, &table.word_column, word, limit)
            .await
        {
            Ok(rows) => rows
                .into_iter()
                .map(|row| SearchResult::from_row(table, row, word))
                .collect(),
            Err(e) => {
                warn!("Search skipped {}: {}", table.source(), e);
                Vec::new()
            }
        }
    }
}
