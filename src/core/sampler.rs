// File: src/core/sampler.rs
//! Picks quiz words, favouring the ones answered wrong most often.

use crate::core::types::Vocabulary;
use crate::error::{Result, VocabError};
use crate::learning::ScoreLog;
use rand::distributions::WeightedIndex;
use rand::prelude::Distribution;
use rand::Rng;

/// Selection weight for every vocabulary word, in vocabulary order.
///
/// `weight = max_score - score + 1`, where `max_score` ranges over the
/// vocabulary only (unscored words count as 0). Every weight is at least 1.
/// Weights are clamped so that their sum fits in a `u64`.
pub fn weights(log: &ScoreLog, vocabulary: &Vocabulary) -> Vec<(String, u64)> {
    let max_score = vocabulary
        .words()
        .map(|word| log.score(word))
        .max()
        .unwrap_or(0);
    let cap = u64::MAX / vocabulary.len().max(1) as u64;

    vocabulary
        .words()
        .map(|word| {
            let spread = i128::from(max_score) - i128::from(log.score(word)) + 1;
            let weight = u64::try_from(spread).map_or(cap, |w| w.min(cap));
            (word.to_string(), weight)
        })
        .collect()
}

/// Draws `count` distinct words in weighted order. A drawn word's weight
/// drops to zero, which gives the same odds as drawing with replacement
/// and discarding repeats.
pub fn sample<R: Rng + ?Sized>(
    log: &ScoreLog,
    vocabulary: &Vocabulary,
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    if count == 0 || count > vocabulary.len() {
        return Err(VocabError::InvalidCount {
            requested: count,
            available: vocabulary.len(),
        });
    }

    let weighted = weights(log, vocabulary);
    let mut distribution = WeightedIndex::new(weighted.iter().map(|(_, weight)| *weight))?;

    let mut selected = Vec::with_capacity(count);
    loop {
        let index = distribution.sample(rng);
        selected.push(weighted[index].0.clone());
        if selected.len() == count {
            break;
        }
        distribution.update_weights(&[(index, &0)])?;
    }
    tracing::debug!(count, "sampled quiz words");
    Ok(selected)
}
