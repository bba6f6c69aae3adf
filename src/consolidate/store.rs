// File: src/consolidate/store.rs
//! Canonical store files: `word: def1、def2` per line, sorted by word.

use crate::consolidate::merge::split_variants;
use crate::consolidate::parse::parse_line;
use crate::core::types::{join_variants, DefinitionMap, Population, Vocabulary, VARIANT_SEPARATOR};
use crate::error::{Result, VocabError};
use crate::persistence::write_atomically;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Store contents exactly as they are written to disk.
pub fn render_store(map: &DefinitionMap) -> String {
    let mut out = String::new();
    for (word, variants) in map {
        out.push_str(word);
        out.push_str(": ");
        out.push_str(&join_variants(variants));
        out.push('\n');
    }
    out
}

fn is_well_formed(definition: &str) -> bool {
    definition
        .split(VARIANT_SEPARATOR)
        .all(|variant| !variant.trim().is_empty())
}

/// Reads a previously written store for `population`, to be merged into.
///
/// A missing store is empty. Malformed lines are reported and dropped so
/// they cannot corrupt the merge.
pub fn read_store(path: &Path, population: Population) -> Result<DefinitionMap> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(DefinitionMap::new()),
        Err(e) => return Err(VocabError::io(path, e)),
    };

    let mut map = DefinitionMap::new();
    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let entry = parse_line(line)
            .filter(|(word, definition)| {
                Population::of(word) == population && is_well_formed(definition)
            });
        match entry {
            Some((word, definition)) => {
                map.entry(word.to_string())
                    .or_default()
                    .extend(split_variants(definition));
            }
            None => {
                tracing::warn!(
                    store = %path.display(),
                    line = index + 1,
                    content = line,
                    "dropping malformed store entry"
                );
            }
        }
    }
    Ok(map)
}

/// Writes the store when its content differs from what is on disk.
/// Returns whether the file was replaced.
pub fn write_store(path: &Path, map: &DefinitionMap) -> Result<bool> {
    let rendered = render_store(map);
    if fs::read_to_string(path).ok().as_deref() == Some(rendered.as_str()) {
        return Ok(false);
    }
    write_atomically(path, |writer| {
        writer
            .write_all(rendered.as_bytes())
            .map_err(|e| VocabError::io(path, e))
    })?;
    tracing::info!(path = %path.display(), words = map.len(), "store written");
    Ok(true)
}

/// Loads a store for quizzing. The store must exist.
pub fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => VocabError::MissingStore(path.to_path_buf()),
        _ => VocabError::io(path, e),
    })?;
    let mut vocabulary = Vocabulary::new();
    extend_vocabulary(&mut vocabulary, &text);
    Ok(vocabulary)
}

/// Adds every vocabulary line of `text`. Other lines are skipped silently.
pub fn extend_vocabulary(vocabulary: &mut Vocabulary, text: &str) {
    for (word, definition) in text.lines().filter_map(parse_line) {
        vocabulary.insert(word, definition);
    }
}
