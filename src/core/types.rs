// src/core/types.rs
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Full-width list separator joining definition variants in store files.
pub const VARIANT_SEPARATOR: char = '、';

/// Word → accepted definition variants. Ordered so that serialization is
/// deterministic: lines sorted by word, variants sorted within a line.
pub type DefinitionMap = BTreeMap<String, BTreeSet<String>>;

/// Which store a word belongs to. Affix entries (`pre-`, `-tion`) are kept
/// apart from plain words and the two are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Population {
    Plain,
    Affix,
}

impl Population {
    pub fn of(word: &str) -> Self {
        if word.starts_with('-') || word.ends_with('-') {
            Population::Affix
        } else {
            Population::Plain
        }
    }
}

/// A single canonical store entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabularyEntry {
    pub word: String,
    pub definitions: BTreeSet<String>,
}

impl VocabularyEntry {
    pub fn population(&self) -> Population {
        Population::of(&self.word)
    }

    /// Variants joined the way they are written to disk.
    pub fn joined_definitions(&self) -> String {
        join_variants(&self.definitions)
    }
}

pub fn join_variants(definitions: &BTreeSet<String>) -> String {
    let mut joined = String::new();
    for (i, variant) in definitions.iter().enumerate() {
        if i > 0 {
            joined.push(VARIANT_SEPARATOR);
        }
        joined.push_str(variant);
    }
    joined
}

/// File and 1-based line a raw record came from. Diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file.display(), self.line)
    }
}

/// One `word: definition` line as found in a raw chapter file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWordRecord {
    pub word: String,
    pub definition_text: String,
    pub location: SourceLocation,
}

/// The words a quiz can draw from, keyed by word with the definition
/// string shown to the user and used for grading.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    entries: BTreeMap<String, String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: impl Into<String>, definition: impl Into<String>) {
        self.entries.insert(word.into(), definition.into());
    }

    pub fn definition(&self, word: &str) -> Option<&str> {
        self.entries.get(word).map(String::as_str)
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Vocabulary {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Outcome of one quiz session. `words`, `answers` and `corrections` are
/// index-aligned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizResult {
    pub words: Vec<String>,
    pub answers: Vec<String>,
    pub corrections: Vec<bool>,
}

impl QuizResult {
    pub fn correct_count(&self) -> usize {
        self.corrections.iter().filter(|&&c| c).count()
    }

    pub fn total(&self) -> usize {
        self.corrections.len()
    }

    pub fn percentage(&self) -> f64 {
        if self.corrections.is_empty() {
            return 0.0;
        }
        self.correct_count() as f64 / self.total() as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_routing() {
        assert_eq!(Population::of("pre-"), Population::Affix);
        assert_eq!(Population::of("-tion"), Population::Affix);
        assert_eq!(Population::of("run"), Population::Plain);
        assert_eq!(Population::of("well-known"), Population::Plain);
    }

    #[test]
    fn test_joined_definitions_sorted() {
        let entry = VocabularyEntry {
            word: "run".into(),
            definitions: ["跑", "奔跑"].iter().map(|s| s.to_string()).collect(),
        };
        assert_eq!(entry.joined_definitions(), "奔跑、跑");
    }

    #[test]
    fn test_quiz_result_score() {
        let result = QuizResult {
            words: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            answers: vec![String::new(); 4],
            corrections: vec![true, false, true, true],
        };
        assert_eq!(result.correct_count(), 3);
        assert_eq!(result.percentage(), 75.0);
        assert_eq!(QuizResult::default().percentage(), 0.0);
    }
}
