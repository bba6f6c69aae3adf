// File: src/persistence.rs
//! Score-log codecs and atomic file replacement.

use crate::error::{Result, VocabError};
use crate::learning::ScoreLog;
use bincode::Options;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// On-disk encoding of the score log. Only one is live at a time and
/// switching does not migrate data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Binary,
}

impl LogFormat {
    pub fn default_path(self) -> PathBuf {
        match self {
            LogFormat::Json => PathBuf::from("log.json"),
            LogFormat::Binary => PathBuf::from("log.bin"),
        }
    }
}

/// Replaces `path` with whatever `write` produces, or leaves it untouched.
///
/// The content goes to a temp file in the same directory which is then
/// renamed over the target.
pub fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&NamedTempFile>) -> Result<()>,
{
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir).map_err(|e| VocabError::io(parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(parent_dir).map_err(|e| VocabError::io(parent_dir, e))?;
    {
        let mut writer = BufWriter::new(&temp_file);
        write(&mut writer)?;
        writer.flush().map_err(|e| VocabError::io(path, e))?;
    }
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| VocabError::io(path, e))?;
    temp_file
        .persist(path)
        .map_err(|e| VocabError::io(path, e.error))?;
    Ok(())
}

/// Serializes entries as a JSON object without re-sorting the keys.
struct OrderedTallies<'a>(&'a [(String, i64)]);

impl Serialize for OrderedTallies<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, tally)| (word, tally)))
    }
}

/// Location and encoding of the score log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFile {
    pub path: PathBuf,
    pub format: LogFormat,
}

impl LogFile {
    pub fn new(path: impl Into<PathBuf>, format: LogFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Reads the log. A missing file is `Ok(None)`; an unreadable or
    /// undecodable one is an error.
    pub fn read(&self) -> Result<Option<ScoreLog>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(VocabError::io(&self.path, e)),
        };
        let reader = BufReader::new(file);

        let log = match self.format {
            LogFormat::Json => {
                let raw: serde_json::Map<String, serde_json::Value> =
                    serde_json::from_reader(reader)?;
                raw.into_iter()
                    .filter_map(|(word, value)| match value.as_i64() {
                        Some(tally) => Some((word, tally)),
                        None => {
                            tracing::warn!(%word, %value, "skipping non-integer log entry");
                            None
                        }
                    })
                    .collect()
            }
            LogFormat::Binary => {
                let mut bytes = Vec::new();
                let mut reader = reader;
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|e| VocabError::io(&self.path, e))?;
                // Same layout as `bincode::serialize_into`, but length
                // prefixes can never claim more than the file holds.
                let entries: Vec<(String, i64)> = bincode::DefaultOptions::new()
                    .with_fixint_encoding()
                    .allow_trailing_bytes()
                    .with_limit(bytes.len() as u64)
                    .deserialize(&bytes)?;
                entries.into_iter().collect()
            }
        };
        Ok(Some(log))
    }

    /// Never fails: a missing log is empty, a corrupt one is reported and
    /// treated as empty.
    pub fn load(&self) -> ScoreLog {
        match self.read() {
            Ok(Some(log)) => {
                tracing::info!(path = %self.path.display(), words = log.len(), "score log loaded");
                log
            }
            Ok(None) => {
                tracing::info!(path = %self.path.display(), "no score log yet, starting empty");
                ScoreLog::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "score log unreadable, starting empty");
                ScoreLog::new()
            }
        }
    }

    /// Writes the pruned, ordered log. On failure the previous file stays.
    pub fn save(&self, log: &ScoreLog) -> Result<()> {
        let entries = log.persisted_entries();
        write_atomically(&self.path, |writer| {
            match self.format {
                LogFormat::Json => serde_json::to_writer(writer, &OrderedTallies(&entries))?,
                LogFormat::Binary => bincode::serialize_into(writer, &entries)?,
            }
            Ok(())
        })?;
        tracing::info!(path = %self.path.display(), words = entries.len(), "score log saved");
        Ok(())
    }
}
