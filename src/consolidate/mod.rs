// File: src/consolidate/mod.rs
//! Vocabulary consolidation pipeline.
//!
//! Raw chapter files are merged into two canonical stores (plain words and
//! affixes). Words repeated in later files are then stripped from those
//! files' raw text, and a final merge pass brings the stores back to a
//! fixed point. Running the pipeline again changes nothing.
//!
//! A fresh rebuild (`merge_existing == false`) only runs the first pass and
//! leaves the sources alone, so it always reproduces the same stores.

pub mod merge;
pub mod parse;
pub mod store;

use crate::core::types::{Population, RawWordRecord, SourceLocation};
use crate::error::{Result, VocabError};
use crate::persistence::write_atomically;
use merge::Populations;
use parse::{parse_line, parse_raw_file, read_source};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Counts from one merge pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub plain_records: usize,
    pub affix_records: usize,
    /// Words defined in more than one source file.
    pub cross_file_duplicates: usize,
    pub plain_words: usize,
    pub affix_words: usize,
    pub stores_written: usize,
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    pub first_pass: MergeStats,
    pub removed_lines: Vec<(PathBuf, usize)>,
    pub final_pass: MergeStats,
}

impl ConsolidationReport {
    pub fn total_removed(&self) -> usize {
        self.removed_lines.iter().map(|(_, n)| n).sum()
    }

    /// True when the run left every file as it was.
    pub fn is_noop(&self) -> bool {
        self.total_removed() == 0
            && self.first_pass.stores_written == 0
            && self.final_pass.stores_written == 0
    }
}

impl fmt::Display for ConsolidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = &self.first_pass;
        writeln!(
            f,
            "Parsed {} word lines and {} affix lines ({} words defined in several files)",
            first.plain_records, first.affix_records, first.cross_file_duplicates
        )?;
        for (path, removed) in self.removed_lines.iter().filter(|(_, n)| *n > 0) {
            writeln!(f, "  {}: removed {} duplicate line(s)", path.display(), removed)?;
        }
        write!(
            f,
            "Store: {} words, {} affixes",
            self.final_pass.plain_words, self.final_pass.affix_words
        )
    }
}

/// Runs merge → dedup → merge over an ordered list of source files.
#[derive(Debug, Clone)]
pub struct Consolidator {
    pub sources: Vec<PathBuf>,
    pub plain_store: PathBuf,
    pub affix_store: PathBuf,
    /// Fold the existing stores into the first merge pass. When unset the
    /// stores are rebuilt from the sources and the sources are not edited.
    pub merge_existing: bool,
}

impl Consolidator {
    pub fn new(
        sources: Vec<PathBuf>,
        plain_store: impl Into<PathBuf>,
        affix_store: impl Into<PathBuf>,
    ) -> Self {
        Self {
            sources,
            plain_store: plain_store.into(),
            affix_store: affix_store.into(),
            merge_existing: true,
        }
    }

    fn store_path(&self, population: Population) -> &Path {
        match population {
            Population::Plain => &self.plain_store,
            Population::Affix => &self.affix_store,
        }
    }

    pub fn run(&self) -> Result<ConsolidationReport> {
        // Nothing is written unless every source is present.
        if let Some(missing) = self.sources.iter().find(|path| !path.is_file()) {
            return Err(VocabError::MissingSource(missing.clone()));
        }
        ensure_distinct(&self.sources)?;

        tracing::info!(sources = self.sources.len(), "merge pass 1");
        let first_pass = self.merge_pass(self.merge_existing)?;

        if !self.merge_existing {
            return Ok(ConsolidationReport {
                final_pass: first_pass.clone(),
                first_pass,
                removed_lines: Vec::new(),
            });
        }

        tracing::info!("removing repeated words from later files");
        let removed_lines = dedup_raw_files(&self.sources)?;

        tracing::info!("merge pass 2");
        let final_pass = self.merge_pass(true)?;

        Ok(ConsolidationReport {
            first_pass,
            removed_lines,
            final_pass,
        })
    }

    /// Parses every source, merges with the stores on disk when
    /// `include_stores` is set, and writes both stores.
    pub fn merge_pass(&self, include_stores: bool) -> Result<MergeStats> {
        let mut records = Vec::new();
        for source in &self.sources {
            records.extend(parse_raw_file(source)?);
        }

        let mut stats = MergeStats {
            cross_file_duplicates: report_cross_file_duplicates(&records),
            ..MergeStats::default()
        };
        for record in &records {
            match Population::of(&record.word) {
                Population::Plain => stats.plain_records += 1,
                Population::Affix => stats.affix_records += 1,
            }
        }

        let incoming = Populations::from_records(&records);
        let merged = if include_stores {
            let mut prior = Populations::default();
            for population in [Population::Plain, Population::Affix] {
                *prior.get_mut(population) =
                    store::read_store(self.store_path(population), population)?;
            }
            prior.merge(incoming)
        } else {
            incoming
        };

        for population in [Population::Plain, Population::Affix] {
            if store::write_store(self.store_path(population), merged.get(population))? {
                stats.stores_written += 1;
            }
        }
        stats.plain_words = merged.plain.len();
        stats.affix_words = merged.affix.len();
        Ok(stats)
    }
}

/// Logs each word found in more than one file and returns how many there
/// are.
fn report_cross_file_duplicates(records: &[RawWordRecord]) -> usize {
    let mut first_seen: HashMap<&str, &SourceLocation> = HashMap::new();
    let mut duplicated: HashSet<&str> = HashSet::new();
    for record in records {
        match first_seen.entry(&record.word) {
            Entry::Occupied(first) if first.get().file != record.location.file => {
                tracing::debug!(
                    word = %record.word,
                    first = %first.get(),
                    again = %record.location,
                    "word defined in several files"
                );
                duplicated.insert(&record.word);
            }
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                slot.insert(&record.location);
            }
        }
    }
    duplicated.len()
}

/// Fails when two entries name the same file, however they are spelled.
fn ensure_distinct(files: &[PathBuf]) -> Result<()> {
    let mut seen = HashSet::with_capacity(files.len());
    for path in files {
        let canonical = path.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => VocabError::MissingSource(path.clone()),
            _ => VocabError::io(path, e),
        })?;
        if !seen.insert(canonical) {
            return Err(VocabError::DuplicateSource(path.clone()));
        }
    }
    Ok(())
}

/// Deletes, from each file's raw text, every vocabulary line whose word
/// already appeared earlier (in a previous file or higher up in the same
/// file). Other lines are kept verbatim. Files are rewritten only when
/// something was removed.
///
/// Returns the number of removed lines per file, in input order.
pub fn dedup_raw_files(files: &[PathBuf]) -> Result<Vec<(PathBuf, usize)>> {
    ensure_distinct(files)?;
    let mut seen: HashSet<String> = HashSet::new();
    let mut removed_per_file = Vec::with_capacity(files.len());

    for path in files {
        let text = read_source(path)?;
        let mut kept = String::with_capacity(text.len());
        let mut removed = 0;

        for (index, line) in text.split_inclusive('\n').enumerate() {
            if let Some((word, _)) = parse_line(line) {
                if !seen.insert(word.to_string()) {
                    tracing::debug!(path = %path.display(), line = index + 1, word, "removing repeated word");
                    removed += 1;
                    continue;
                }
            }
            kept.push_str(line);
        }

        if removed > 0 {
            write_atomically(path, |writer| {
                writer
                    .write_all(kept.as_bytes())
                    .map_err(|e| VocabError::io(path, e))
            })?;
            tracing::info!(path = %path.display(), removed, "rewrote source file");
        }
        removed_per_file.push((path.clone(), removed));
    }
    Ok(removed_per_file)
}
