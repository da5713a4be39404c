//! Column-name vocabularies used to recognise lexical tables
//!
//! Each list is ordered; a column's position in its list is its priority.
//! Names are stored lower-cased and compared against lower-cased column
//! names.

use std::collections::BTreeSet;

/// The role a column plays in a lexical table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRole {
    Word,
    Definition,
    Example,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    word: Vec<String>,
    definition: Vec<String>,
    example: Vec<String>,
}

pub const DEFAULT_WORD_COLUMNS: &[&str] = &["word", "term", "lemma", "headword", "entry", "name"];

pub const DEFAULT_DEFINITION_COLUMNS: &[&str] = &[
    "definition",
    "definitions",
    "meaning",
    "meanings",
    "gloss",
    "sense",
    "description",
    "explanation",
    "def",
];

pub const DEFAULT_EXAMPLE_COLUMNS: &[&str] = &[
    "example",
    "examples",
    "example_sentence",
    "sentence",
    "usage",
    "sample",
    "quote",
];

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_WORD_COLUMNS.iter().copied(),
            DEFAULT_DEFINITION_COLUMNS.iter().copied(),
            DEFAULT_EXAMPLE_COLUMNS.iter().copied(),
        )
    }
}

impl Vocabulary {
    pub fn new<W, D, E>(word: W, definition: D, example: E) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        D: IntoIterator,
        D::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            word: normalize(word),
            definition: normalize(definition),
            example: normalize(example),
        }
    }

    /// Replace one list, keeping the others
    pub fn with_list<I>(mut self, role: ColumnRole, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let names = normalize(names);
        match role {
            ColumnRole::Word => self.word = names,
            ColumnRole::Definition => self.definition = names,
            ColumnRole::Example => self.example = names,
        }
        self
    }

    pub fn list(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Word => &self.word,
            ColumnRole::Definition => &self.definition,
            ColumnRole::Example => &self.example,
        }
    }

    /// Vocabulary entries of `role` present in `columns`, in priority order
    pub fn matching(&self, role: ColumnRole, columns: &BTreeSet<String>) -> Vec<String> {
        self.list(role)
            .iter()
            .filter(|name| columns.contains(*name))
            .cloned()
            .collect()
    }

    /// Highest-priority word column present in `columns`
    pub fn word_column(&self, columns: &BTreeSet<String>) -> Option<String> {
        self.word.iter().find(|name| columns.contains(*name)).cloned()
    }
}

fn normalize<I>(names: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref().trim().to_lowercase();
        if !name.is_empty() && !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn word_column_follows_vocabulary_order() {
        let vocab = Vocabulary::default();
        let cols = columns(&["name", "term", "definition"]);
        assert_eq!(vocab.word_column(&cols).as_deref(), Some("term"));
    }

    #[test]
    fn matching_preserves_vocabulary_order() {
        let vocab = Vocabulary::default();
        let cols = columns(&["gloss", "meaning", "definition", "id"]);
        assert_eq!(
            vocab.matching(ColumnRole::Definition, &cols),
            vec!["definition", "meaning", "gloss"]
        );
    }

    #[test]
    fn new_normalizes_and_dedups() {
        let vocab = Vocabulary::new([" Word ", "WORD", ""], ["Meaning"], Vec::<String>::new());
        assert_eq!(vocab.list(ColumnRole::Word), ["word"]);
        assert_eq!(vocab.list(ColumnRole::Definition), ["meaning"]);
        assert!(vocab.list(ColumnRole::Example).is_empty());
    }

    #[test]
    fn with_list_substitutes_one_role() {
        let vocab = Vocabulary::default().with_list(ColumnRole::Word, ["vocable"]);
        assert_eq!(vocab.list(ColumnRole::Word), ["vocable"]);
        assert_eq!(
            vocab.list(ColumnRole::Definition),
            Vocabulary::default().list(ColumnRole::Definition)
        );
    }
}
