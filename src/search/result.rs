//! Search result shape and row mapping

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::database::RawRow;
use crate::inspector::CandidateTable;

/// One matching row, reduced to the fields a client renders
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// `database.table` the row came from
    pub source: String,
    pub word: String,
    pub definitions: Vec<String>,
    pub examples: Vec<String>,
    #[serde(rename = "row")]
    pub raw_row: RawRow,
}

impl SearchResult {
    /// Map a probed row through the table's detected columns.
    ///
    /// Null and blank values are dropped; numbers and booleans are rendered
    /// as text. `query` stands in for the word when the row's cell is null.
    pub fn from_row(table: &CandidateTable, row: RawRow, query: &str) -> Self {
        let word = cell(&row, &table.word_column).unwrap_or_else(|| query.to_string());
        let definitions = table
            .definition_columns
            .iter()
            .filter_map(|column| cell(&row, column))
            .collect();
        let examples = table
            .example_columns
            .iter()
            .filter_map(|column| cell(&row, column))
            .collect();

        Self {
            source: table.source(),
            word,
            definitions,
            examples,
            raw_row: row,
        }
    }
}

/// Non-blank text of `column`, matched case-insensitively against row keys
fn cell(row: &RawRow, column: &str) -> Option<String> {
    let value = row
        .get(column)
        .or_else(|| {
            row.iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(column))
                .map(|(_, value)| value)
        })?;

    let text = match value {
        JsonValue::Null => return None,
        JsonValue::String(s) => s.trim().to_string(),
        JsonValue::Array(items) if items.is_empty() => return None,
        other => other.to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
