// File: src/config.rs
//! Optional TOML configuration shared by both binaries.

use crate::error::{Result, VocabError};
use crate::persistence::{LogFile, LogFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "vocab.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Canonical store of plain words.
    #[serde(default = "default_vocabulary_file")]
    pub vocabulary_file: PathBuf,
    /// Canonical store of prefixes and suffixes.
    #[serde(default = "default_affix_file")]
    pub affix_file: PathBuf,
    /// Score log location. Defaults to `log.json` or `log.bin` by format.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Rows shown per page in the history view.
    #[serde(default = "default_page_size")]
    pub history_page_size: usize,
    /// Quiz affix entries alongside plain words.
    #[serde(default)]
    pub include_affixes: bool,
    /// Raw chapter files, in precedence order, for consolidation.
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    /// Fold existing stores into consolidation instead of rebuilding.
    #[serde(default = "default_true")]
    pub merge_existing: bool,
}

fn default_vocabulary_file() -> PathBuf {
    PathBuf::from("words.txt")
}
fn default_affix_file() -> PathBuf {
    PathBuf::from("affixes.txt")
}
fn default_page_size() -> usize {
    10
}
fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vocabulary_file: default_vocabulary_file(),
            affix_file: default_affix_file(),
            log_file: None,
            log_format: LogFormat::default(),
            history_page_size: default_page_size(),
            include_affixes: false,
            sources: Vec::new(),
            merge_existing: true,
        }
    }
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| VocabError::io(path, e))?;
        toml::from_str(&text).map_err(|source| VocabError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist. Without one, `vocab.toml` is used when
    /// present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(fallback)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn log(&self) -> LogFile {
        let path = self
            .log_file
            .clone()
            .unwrap_or_else(|| self.log_format.default_path());
        LogFile::new(path, self.log_format)
    }

    /// Clamped so paging always advances.
    pub fn page_size(&self) -> usize {
        self.history_page_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.log(), LogFile::new("log.json", LogFormat::Json));
    }

    #[test]
    fn test_binary_format_default_path() {
        let config: Config = toml::from_str(r#"log_format = "binary""#).unwrap();
        assert_eq!(config.log(), LogFile::new("log.bin", LogFormat::Binary));
    }

    #[test]
    fn test_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vocab.toml");
        fs::write(
            &path,
            r#"
vocabulary_file = "store/words.txt"
log_file = "state/scores.json"
history_page_size = 0
include_affixes = true
sources = ["chapter_1/1-0.txt", "chapter_1/1-1.txt"]
merge_existing = false
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.vocabulary_file, PathBuf::from("store/words.txt"));
        assert_eq!(config.affix_file, PathBuf::from("affixes.txt"));
        assert_eq!(config.log().path, PathBuf::from("state/scores.json"));
        assert_eq!(config.page_size(), 1);
        assert!(config.include_affixes);
        assert_eq!(config.sources.len(), 2);
        assert!(!config.merge_existing);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vocab.toml");
        fs::write(&path, "history_page_size = \"ten\"").unwrap();
        assert!(matches!(
            Config::load(Some(path.as_path())),
            Err(VocabError::Config { .. })
        ));
    }
}
