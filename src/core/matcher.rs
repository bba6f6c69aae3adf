// File: src/core/matcher.rs
//! Grades a typed answer against a stored definition.

use crate::core::normalizer::{normalize, split_answer};
use std::collections::HashSet;

/// Answers that mean "I don't know". Graded wrong without confirmation.
const SKIP_TOKENS: [&str; 2] = ["n", "x"];

const YES_TOKENS: [&str; 6] = ["y", "yes", "是", "对", "對", "1"];
const NO_TOKENS: [&str; 6] = ["n", "no", "否", "错", "錯", "0"];

/// Result of comparing an answer to the accepted variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Match,
    NoMatch,
    /// No variant matched; a human has to decide.
    Ambiguous,
}

impl Verdict {
    /// Final grade, asking `confirm` only for ambiguous verdicts.
    pub fn resolve<E>(self, confirm: impl FnOnce() -> Result<bool, E>) -> Result<bool, E> {
        match self {
            Verdict::Match => Ok(true),
            Verdict::NoMatch => Ok(false),
            Verdict::Ambiguous => confirm(),
        }
    }
}

pub fn is_skip(user_answer: &str) -> bool {
    let folded = user_answer.trim().to_lowercase();
    folded.is_empty() || SKIP_TOKENS.contains(&folded.as_str())
}

/// Normalized, non-empty variants of `text`.
pub fn variant_set(text: &str) -> HashSet<String> {
    split_answer(text)
        .iter()
        .map(|fragment| normalize(fragment))
        .filter(|variant| !variant.is_empty())
        .collect()
}

pub fn matches(user_answer: &str, correct_definition: &str) -> Verdict {
    if is_skip(user_answer) {
        return Verdict::NoMatch;
    }
    let accepted = variant_set(correct_definition);
    if variant_set(user_answer)
        .iter()
        .any(|variant| accepted.contains(variant))
    {
        Verdict::Match
    } else {
        Verdict::Ambiguous
    }
}

/// Parses a confirmation reply. `None` means the caller must ask again.
pub fn parse_yes_no(reply: &str) -> Option<bool> {
    let folded = reply.trim().to_lowercase();
    if YES_TOKENS.contains(&folded.as_str()) {
        Some(true)
    } else if NO_TOKENS.contains(&folded.as_str()) {
        Some(false)
    } else {
        None
    }
}
