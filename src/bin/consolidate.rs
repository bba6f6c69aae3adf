// File: src/bin/consolidate.rs
//! Merges raw chapter files into the canonical vocabulary stores and strips
//! repeated words from later chapters.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use vocab_core::consolidate::Consolidator;
use vocab_core::Config;

#[derive(Parser)]
#[command(name = "vocab_consolidate", version, about = "Build the vocabulary store from chapter files")]
struct Cli {
    /// Raw chapter files in precedence order (earlier files win)
    sources: Vec<PathBuf>,

    /// Config file path (defaults to ./vocab.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Plain word store to write
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Affix store to write
    #[arg(long)]
    affixes: Option<PathBuf>,

    /// Rebuild the stores from the sources alone without editing the sources
    #[arg(long)]
    fresh: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocab_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let sources = if cli.sources.is_empty() {
        config.sources.clone()
    } else {
        cli.sources
    };
    if sources.is_empty() {
        bail!("no source files given (pass them as arguments or set `sources` in the config)");
    }

    let mut consolidator = Consolidator::new(
        sources,
        cli.vocabulary.unwrap_or(config.vocabulary_file),
        cli.affixes.unwrap_or(config.affix_file),
    );
    consolidator.merge_existing = config.merge_existing && !cli.fresh;

    let report = consolidator.run().context("consolidation aborted")?;
    println!("{report}");
    if report.is_noop() {
        println!("Already consolidated, nothing changed.");
    }
    Ok(())
}
