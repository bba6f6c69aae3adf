// File: src/bin/quiz/terminal.rs
//! Line-based terminal front end for quiz sessions.

use crossterm::cursor::MoveToPreviousLine;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufRead, Write};
use vocab_core::core::matcher::parse_yes_no;
use vocab_core::core::types::{QuizResult, Vocabulary};
use vocab_core::display::{results_table, score_line};
use vocab_core::{QuizIo, Result, VocabError};

pub struct Terminal {
    input: io::StdinLock<'static>,
    output: io::Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stdout(),
        }
    }

    /// Prints `text` and reads one line without its line ending. Bytes that
    /// are not UTF-8 become U+FFFD. End of input means the user gave up.
    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}").map_err(|e| VocabError::io("<stdout>", e))?;
        self.output.flush().map_err(|e| VocabError::io("<stdout>", e))?;

        let mut bytes = Vec::new();
        let read = self
            .input
            .read_until(b'\n', &mut bytes)
            .map_err(|e| VocabError::io("<stdin>", e))?;
        if read == 0 {
            return Err(VocabError::Cancelled);
        }
        let line = String::from_utf8_lossy(&bytes);
        Ok(line.trim_end_matches(&['\n', '\r'][..]).to_string())
    }

    /// Removes the pager prompt so the listing reads continuously.
    pub fn clear_previous_line(&mut self) -> Result<()> {
        execute!(self.output, MoveToPreviousLine(1), Clear(ClearType::CurrentLine))
            .map_err(|e| VocabError::io("<stdout>", e))
    }
}

impl QuizIo for Terminal {
    fn answer(&mut self, index: usize, total: usize, word: &str) -> Result<String> {
        self.prompt(&format!(
            "Question {index}/{total}: what does '{word}' mean? (enter N if you don't know) "
        ))
    }

    fn confirm(&mut self, index: usize, word: &str, answer: &str, correct: &str) -> Result<bool> {
        println!("\nQuestion {index}: '{word}'");
        println!("Your answer:    {answer}");
        println!("Correct answer: {correct}");
        loop {
            let reply = self.prompt("Is your answer correct? [Y/N]: ")?;
            match parse_yes_no(&reply) {
                Some(verdict) => return Ok(verdict),
                None => println!("Please enter 'Y' or 'N'."),
            }
        }
    }

    fn show_results(&mut self, result: &QuizResult, vocabulary: &Vocabulary) -> Result<()> {
        let rule = "=".repeat(50);
        println!("\n{rule}\nResults\n{rule}");
        println!("{}", results_table(result, vocabulary));
        println!("\n{}", score_line(result));
        Ok(())
    }
}
