// src/lib.rs
//! Vocabulary drilling: consolidates raw `word: definition` chapter files
//! into a canonical store and runs weighted quiz sessions against it.

pub mod config;
pub mod consolidate;
pub mod core;
pub mod display;
pub mod error;
pub mod learning;
pub mod persistence;

pub use crate::config::Config;
pub use crate::core::session::{QuizIo, QuizSession};
pub use crate::error::{Result, VocabError};
pub use crate::learning::ScoreLog;
pub use crate::persistence::{LogFile, LogFormat};
