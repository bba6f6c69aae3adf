// File: src/learning.rs
//! Per-word score tallies that drive weighted sampling.

use std::collections::HashMap;

/// Net correct-minus-incorrect count per word. Words never tested are
/// absent and score 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreLog {
    tallies: HashMap<String, i64>,
}

/// Which slice of the history to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryFilter {
    /// Every non-zero tally, signed.
    All,
    /// Words with a positive tally.
    Correct,
    /// Words with a negative tally, reported as positive miss counts.
    Incorrect,
}

impl ScoreLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self, word: &str) -> i64 {
        self.tallies.get(word).copied().unwrap_or(0)
    }

    pub fn set(&mut self, word: impl Into<String>, tally: i64) {
        self.tallies.insert(word.into(), tally);
    }

    /// +1 for a correct answer, -1 otherwise.
    pub fn record(&mut self, word: &str, correct: bool) {
        let delta = if correct { 1 } else { -1 };
        *self.tallies.entry(word.to_string()).or_insert(0) += delta;
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Entries in on-disk order: zero tallies dropped, descending tally,
    /// ties broken by ascending word.
    pub fn persisted_entries(&self) -> Vec<(String, i64)> {
        let mut entries: Vec<(String, i64)> = self
            .tallies
            .iter()
            .filter(|(_, &tally)| tally != 0)
            .map(|(word, &tally)| (word.clone(), tally))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.sort_by_key(|&(_, tally)| std::cmp::Reverse(tally));
        entries
    }

    /// History rows for display, most extreme first.
    pub fn history(&self, filter: HistoryFilter) -> Vec<(String, i64)> {
        let mut rows: Vec<(String, i64)> = self
            .persisted_entries()
            .into_iter()
            .filter_map(|(word, tally)| match filter {
                HistoryFilter::All => Some((word, tally)),
                HistoryFilter::Correct if tally > 0 => Some((word, tally)),
                HistoryFilter::Incorrect if tally < 0 => Some((word, -tally)),
                _ => None,
            })
            .collect();
        rows.sort_by_key(|&(_, count)| std::cmp::Reverse(count));
        rows
    }
}

impl FromIterator<(String, i64)> for ScoreLog {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            tallies: iter.into_iter().collect(),
        }
    }
}
