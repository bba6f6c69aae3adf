// File: src/consolidate/parse.rs
//! Raw chapter-file parsing.

use crate::core::types::{RawWordRecord, SourceLocation};
use crate::error::{Result, VocabError};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Splits a `word: definition` line. Anything that does not split on `:`
/// into exactly two non-empty parts is not a vocabulary line.
pub fn parse_line(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split(':');
    let word = parts.next()?.trim();
    let definition = parts.next()?.trim();
    if parts.next().is_some() || word.is_empty() || definition.is_empty() {
        return None;
    }
    Some((word, definition))
}

/// All vocabulary lines of `text`, tagged with `file` and their line number.
pub fn parse_records(file: &Path, text: &str) -> Vec<RawWordRecord> {
    text.lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let (word, definition) = parse_line(line)?;
            Some(RawWordRecord {
                word: word.to_string(),
                definition_text: definition.to_string(),
                location: SourceLocation {
                    file: file.to_path_buf(),
                    line: index + 1,
                },
            })
        })
        .collect()
}

/// Reads a source file. A missing file is [`VocabError::MissingSource`].
pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VocabError::MissingSource(path.to_path_buf()),
        _ => VocabError::io(path, e),
    })
}

pub fn parse_raw_file(path: &Path) -> Result<Vec<RawWordRecord>> {
    let text = read_source(path)?;
    let records = parse_records(path, &text);
    tracing::debug!(path = %path.display(), records = records.len(), "parsed source file");
    Ok(records)
}
