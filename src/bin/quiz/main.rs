// File: src/bin/quiz/main.rs
//! Interactive vocabulary quiz.

mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;
use terminal::Terminal;
use tracing_subscriber::EnvFilter;
use vocab_core::consolidate::store::{extend_vocabulary, load_vocabulary};
use vocab_core::core::types::Vocabulary;
use vocab_core::display::history_lines;
use vocab_core::learning::HistoryFilter;
use vocab_core::{Config, LogFile, LogFormat, QuizSession, ScoreLog, VocabError};

#[derive(Parser)]
#[command(name = "vocab_quiz", version, about = "Weighted vocabulary quiz")]
struct Cli {
    /// Config file path (defaults to ./vocab.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Vocabulary store to quiz from
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    /// Score log path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Score log encoding
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,

    /// Also quiz prefixes and suffixes from the affix store
    #[arg(long)]
    include_affixes: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vocab_core=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        if matches!(e.downcast_ref::<VocabError>(), Some(VocabError::Cancelled)) {
            println!("\nCancelled.");
            process::exit(0);
        }
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(path) = cli.vocabulary {
        config.vocabulary_file = path;
    }
    if let Some(path) = cli.log_file {
        config.log_file = Some(path);
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.include_affixes |= cli.include_affixes;

    let vocabulary = load_quiz_vocabulary(&config)?;
    let log_file = config.log();
    let mut log = load_log(&log_file);
    let mut terminal = Terminal::new();
    let mut rng = rand::thread_rng();

    println!("Welcome to the vocabulary quiz!");
    println!("The vocabulary has {} words.", vocabulary.len());

    loop {
        let choice =
            terminal.prompt("\n[1. Start test][2. View history][3. Reload log][4. Save log][5. Exit]: ")?;
        match choice.trim() {
            "1" => {
                let count = read_count(&mut terminal, vocabulary.len())?;
                println!("\nStarting the test! {count} questions\n");
                let summary = QuizSession::new(&vocabulary, &mut log, &log_file)
                    .run(count, &mut rng, &mut terminal)?;
                match summary.save_error {
                    None => println!("\nHistory saved."),
                    Some(e) => println!("\nCould not save history: {e}"),
                }
            }
            "2" => show_history(&mut terminal, &log, config.page_size())?,
            "3" => log = load_log(&log_file),
            "4" => match log_file.save(&log) {
                Ok(()) => println!("\nHistory saved."),
                Err(e) => println!("\nCould not save history: {e}"),
            },
            "5" => {
                println!("\nThanks for practising, goodbye!");
                return Ok(());
            }
            _ => println!("\nInvalid choice, please try again."),
        }
    }
}

fn load_quiz_vocabulary(config: &Config) -> Result<Vocabulary> {
    let mut vocabulary = load_vocabulary(&config.vocabulary_file)
        .with_context(|| format!("cannot start a quiz without {}", config.vocabulary_file.display()))?;
    if config.include_affixes && config.affix_file.is_file() {
        let text = std::fs::read_to_string(&config.affix_file)
            .with_context(|| format!("reading {}", config.affix_file.display()))?;
        extend_vocabulary(&mut vocabulary, &text);
    }
    if vocabulary.is_empty() {
        return Err(VocabError::EmptyVocabulary(config.vocabulary_file.clone()).into());
    }
    Ok(vocabulary)
}

fn load_log(log_file: &LogFile) -> ScoreLog {
    match log_file.read() {
        Ok(Some(log)) => {
            println!("\nHistory loaded ({} words).", log.len());
            log
        }
        Ok(None) => {
            println!("\nNo history yet, starting fresh.");
            ScoreLog::new()
        }
        Err(e) => {
            println!("\nCould not read history ({e}), starting fresh.");
            ScoreLog::new()
        }
    }
}

fn read_count(terminal: &mut Terminal, available: usize) -> Result<usize> {
    loop {
        let reply = terminal.prompt("How many questions? ")?;
        match reply.trim().parse::<i64>() {
            Err(_) => println!("Please enter a valid number."),
            Ok(n) if n <= 0 => println!("Please enter a positive number."),
            Ok(n) if n as u64 > available as u64 => {
                println!("The number of questions cannot exceed the vocabulary size ({available}).")
            }
            Ok(n) => return Ok(n as usize),
        }
    }
}

fn show_history(terminal: &mut Terminal, log: &ScoreLog, page_size: usize) -> Result<()> {
    let choice = terminal.prompt("[1. All][2. Correct counts][3. Wrong counts][4. Back]: ")?;
    let (filter, title) = match choice.trim() {
        "1" => (HistoryFilter::All, "All records:"),
        "2" => (HistoryFilter::Correct, "Correct counts:"),
        "3" => (HistoryFilter::Incorrect, "Wrong counts:"),
        "4" => return Ok(()),
        _ => {
            println!("\nInvalid choice, please try again.");
            return Ok(());
        }
    };

    println!("\n{title}");
    let lines = history_lines(&log.history(filter));
    if lines.is_empty() {
        println!("No records.");
        return Ok(());
    }
    for (i, line) in lines.iter().enumerate() {
        println!("{line}");
        let shown = i + 1;
        if shown % page_size == 0 && shown < lines.len() {
            let reply = terminal.prompt("Press Enter to continue (q or exit to stop)...")?;
            if matches!(reply.trim().to_lowercase().as_str(), "q" | "exit") {
                break;
            }
            terminal.clear_previous_line()?;
        }
    }
    Ok(())
}
