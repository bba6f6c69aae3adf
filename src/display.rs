// File: src/display.rs
//! Text rendering for quiz results and score history.

use crate::core::types::{QuizResult, Vocabulary};
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::{ContentArrangement, Table};

/// Google Translate lookup for an English word.
pub fn translate_url(word: &str) -> String {
    format!(
        "https://translate.google.com/?sl=en&tl=zh-TW&text={}&op=translate",
        word.replace(' ', "%20")
    )
}

pub fn results_table(result: &QuizResult, vocabulary: &Vocabulary) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["#", "Word", "Result", "Answer", "Google Translate"]);

    for (i, (word, &is_correct)) in result.words.iter().zip(&result.corrections).enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            word.clone(),
            if is_correct { "✓ correct" } else { "✗ wrong" }.to_string(),
            vocabulary.definition(word).unwrap_or_default().to_string(),
            translate_url(word),
        ]);
    }
    table
}

pub fn score_line(result: &QuizResult) -> String {
    format!(
        "Score: {}/{} ({:.1}%)",
        result.correct_count(),
        result.total(),
        result.percentage()
    )
}

/// `word: N times` rows, words padded to a common terminal width so
/// full-width characters line up too.
pub fn history_lines(rows: &[(String, i64)]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }
    let mut table = Table::new();
    table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Disabled);
    for (word, count) in rows {
        table.add_row(vec![word.clone(), format!(": {count} times")]);
    }
    for column in table.column_iter_mut() {
        column.set_padding((0, 0));
    }
    table
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}
