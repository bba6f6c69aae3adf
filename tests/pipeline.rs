//! Library-level tests across consolidation and quizzing.

use pretty_assertions::assert_eq;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use vocab_core::consolidate::store::load_vocabulary;
use vocab_core::consolidate::Consolidator;
use vocab_core::core::sampler::sample;
use vocab_core::{LogFile, LogFormat, ScoreLog};

fn chapter(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn consolidation_converges_and_keeps_all_variants() {
    let dir = TempDir::new().unwrap();
    let sources = vec![
        chapter(&dir, "1-0.txt", "Chapter 1\nlarge: 大\nun-: 不\n"),
        chapter(&dir, "1-1.txt", "large: 巨大的、大\nsmall: 小\n"),
        chapter(&dir, "1-2.txt", "small: 微小\nun-: 非\ntiny: 極小\n"),
    ];
    let consolidator = Consolidator::new(
        sources.clone(),
        dir.path().join("words.txt"),
        dir.path().join("affixes.txt"),
    );

    let first = consolidator.run().unwrap();
    assert_eq!(first.total_removed(), 3);
    let words = fs::read_to_string(dir.path().join("words.txt")).unwrap();
    assert_eq!(words, "large: 大、巨大的\nsmall: 小、微小\ntiny: 極小\n");
    assert_eq!(
        fs::read_to_string(dir.path().join("affixes.txt")).unwrap(),
        "un-: 不、非\n"
    );
    assert_eq!(fs::read_to_string(&sources[2]).unwrap(), "tiny: 極小\n");

    let second = consolidator.run().unwrap();
    assert!(second.is_noop());
    assert_eq!(fs::read_to_string(dir.path().join("words.txt")).unwrap(), words);
}

#[test]
fn fresh_rebuild_from_untouched_sources_matches() {
    let dir = TempDir::new().unwrap();
    let sources = vec![chapter(&dir, "a.txt", "b: 2\na: 1\n")];
    let mut consolidator = Consolidator::new(
        sources,
        dir.path().join("words.txt"),
        dir.path().join("affixes.txt"),
    );
    consolidator.merge_existing = false;
    consolidator.run().unwrap();
    assert_eq!(
        fs::read_to_string(dir.path().join("words.txt")).unwrap(),
        "a: 1\nb: 2\n"
    );
}

#[test]
fn consolidated_store_feeds_the_sampler() {
    let dir = TempDir::new().unwrap();
    let sources = vec![chapter(&dir, "a.txt", "one: 一\ntwo: 二\nthree: 三\n")];
    Consolidator::new(sources, dir.path().join("words.txt"), dir.path().join("affixes.txt"))
        .run()
        .unwrap();

    let vocabulary = load_vocabulary(&dir.path().join("words.txt")).unwrap();
    let log_file = LogFile::new(dir.path().join("log.bin"), LogFormat::Binary);
    let mut log = ScoreLog::new();
    log.record("one", true);
    log_file.save(&log).unwrap();

    let log = log_file.load();
    let mut rng = SmallRng::seed_from_u64(11);
    let mut picked = sample(&log, &vocabulary, 3, &mut rng).unwrap();
    picked.sort();
    assert_eq!(picked, vec!["one", "three", "two"]);
}
