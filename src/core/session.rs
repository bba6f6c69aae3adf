// File: src/core/session.rs
//! One quiz run: sample words, collect answers, grade, record, persist.

use crate::core::matcher::matches;
use crate::core::sampler::sample;
use crate::core::types::{QuizResult, Vocabulary};
use crate::error::{Result, VocabError};
use crate::learning::ScoreLog;
use crate::persistence::LogFile;
use rand::Rng;

/// The terminal side of a session. Implemented by the interactive binary
/// and by scripted fakes in tests.
pub trait QuizIo {
    /// Asks question `index` (1-based) of `total` and returns the raw reply.
    fn answer(&mut self, index: usize, total: usize, word: &str) -> Result<String>;

    /// Asks a human whether `answer` is acceptable for `word`. Must keep
    /// asking until it gets a yes or a no.
    fn confirm(&mut self, index: usize, word: &str, answer: &str, correct: &str) -> Result<bool>;

    /// Shows the graded session.
    fn show_results(&mut self, result: &QuizResult, vocabulary: &Vocabulary) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    CollectingAnswers,
    Grading,
    Summarizing,
}

/// What the caller gets back once a session returns to `Idle`.
#[derive(Debug)]
pub struct SessionSummary {
    pub result: QuizResult,
    /// Set when the log could not be written. The in-memory log still has
    /// this session's updates, so saving can be retried.
    pub save_error: Option<VocabError>,
}

pub struct QuizSession<'a> {
    vocabulary: &'a Vocabulary,
    log: &'a mut ScoreLog,
    log_file: &'a LogFile,
    state: SessionState,
    words: Vec<String>,
    answers: Vec<String>,
    result: QuizResult,
}

impl<'a> QuizSession<'a> {
    pub fn new(vocabulary: &'a Vocabulary, log: &'a mut ScoreLog, log_file: &'a LogFile) -> Self {
        Self {
            vocabulary,
            log,
            log_file,
            state: SessionState::Idle,
            words: Vec::new(),
            answers: Vec::new(),
            result: QuizResult::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    fn ensure_state(&self, expected: SessionState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(VocabError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Fixes the word set for the whole session.
    pub fn start<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<&[String]> {
        self.ensure_state(SessionState::Idle)?;
        self.words = sample(&*self.log, self.vocabulary, count, rng)?;
        self.answers.clear();
        self.result = QuizResult::default();
        self.state = SessionState::CollectingAnswers;
        tracing::debug!(count, "session started");
        Ok(self.words.as_slice())
    }

    /// Asks every question in order. Skips do not end the session early.
    pub fn collect_answers(&mut self, io: &mut dyn QuizIo) -> Result<()> {
        self.ensure_state(SessionState::CollectingAnswers)?;
        let total = self.words.len();
        let mut answers = Vec::with_capacity(total);
        for (i, word) in self.words.iter().enumerate() {
            answers.push(io.answer(i + 1, total, word)?);
        }
        self.submit_answers(answers)
    }

    /// Accepts answers gathered elsewhere, index-aligned with [`Self::words`].
    pub fn submit_answers(&mut self, answers: Vec<String>) -> Result<()> {
        self.ensure_state(SessionState::CollectingAnswers)?;
        if answers.len() != self.words.len() {
            return Err(VocabError::AnswerCountMismatch {
                answers: answers.len(),
                words: self.words.len(),
            });
        }
        self.answers = answers;
        self.state = SessionState::Grading;
        Ok(())
    }

    /// Grades each answer, asking `io` about ambiguous ones, and records
    /// every verdict in the score log.
    pub fn grade(&mut self, io: &mut dyn QuizIo) -> Result<&QuizResult> {
        self.ensure_state(SessionState::Grading)?;
        let mut corrections = Vec::with_capacity(self.words.len());
        for (i, (word, answer)) in self.words.iter().zip(&self.answers).enumerate() {
            let correct = self.vocabulary.definition(word).unwrap_or_default();
            let verdict = matches(answer, correct);
            let is_correct = verdict.resolve(|| io.confirm(i + 1, word, answer, correct))?;
            tracing::debug!(%word, ?verdict, is_correct, "graded");
            corrections.push(is_correct);
        }

        for (word, &is_correct) in self.words.iter().zip(&corrections) {
            self.log.record(word, is_correct);
        }
        self.result = QuizResult {
            words: self.words.clone(),
            answers: self.answers.clone(),
            corrections,
        };
        self.state = SessionState::Summarizing;
        Ok(&self.result)
    }

    /// Shows the results and persists the log. A failed save is returned in
    /// the summary rather than as an error.
    pub fn summarize(&mut self, io: &mut dyn QuizIo) -> Result<SessionSummary> {
        self.ensure_state(SessionState::Summarizing)?;
        io.show_results(&self.result, self.vocabulary)?;

        let save_error = match self.log_file.save(&*self.log) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(error = %e, "could not save score log");
                Some(e)
            }
        };
        self.state = SessionState::Idle;
        self.words.clear();
        self.answers.clear();
        Ok(SessionSummary {
            result: std::mem::take(&mut self.result),
            save_error,
        })
    }

    /// Runs a whole session from `Idle` back to `Idle`.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        rng: &mut R,
        io: &mut dyn QuizIo,
    ) -> Result<SessionSummary> {
        self.start(count, rng)?;
        self.collect_answers(io)?;
        self.grade(io)?;
        self.summarize(io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;
    use tempfile::TempDir;

    #[derive(Default)]
    struct ScriptedIo {
        answers: VecDeque<String>,
        confirmations: VecDeque<bool>,
        confirm_calls: usize,
        shown: usize,
    }

    impl ScriptedIo {
        fn new(answers: &[&str], confirmations: &[bool]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                confirmations: confirmations.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    impl QuizIo for ScriptedIo {
        fn answer(&mut self, _index: usize, _total: usize, _word: &str) -> Result<String> {
            self.answers.pop_front().ok_or(VocabError::Cancelled)
        }

        fn confirm(&mut self, _index: usize, _word: &str, _answer: &str, _correct: &str) -> Result<bool> {
            self.confirm_calls += 1;
            self.confirmations.pop_front().ok_or(VocabError::Cancelled)
        }

        fn show_results(&mut self, _result: &QuizResult, _vocabulary: &Vocabulary) -> Result<()> {
            self.shown += 1;
            Ok(())
        }
    }

    fn vocabulary(entries: &[(&str, &str)]) -> Vocabulary {
        entries
            .iter()
            .map(|(w, d)| (w.to_string(), d.to_string()))
            .collect()
    }

    #[test]
    fn test_match_needs_no_confirmation() {
        let dir = TempDir::new().unwrap();
        let log_file = LogFile::new(dir.path().join("log.json"), Default::default());
        let vocab = vocabulary(&[("run", "跑、奔跑")]);
        let mut log = ScoreLog::new();
        let mut io = ScriptedIo::new(&["奔跑的"], &[]);
        let mut rng = SmallRng::seed_from_u64(3);

        let summary = QuizSession::new(&vocab, &mut log, &log_file)
            .run(1, &mut rng, &mut io)
            .unwrap();
        assert_eq!(summary.result.corrections, vec![true]);
        assert!(summary.save_error.is_none());
        assert_eq!(io.confirm_calls, 0);
        assert_eq!(io.shown, 1);
        assert_eq!(log.score("run"), 1);
    }

    #[test]
    fn test_rejected_confirmation_lowers_tally() {
        let dir = TempDir::new().unwrap();
        let log_file = LogFile::new(dir.path().join("log.json"), Default::default());
        let vocab = vocabulary(&[("cat", "貓")]);
        let mut log = ScoreLog::new();
        let mut io = ScriptedIo::new(&["狗"], &[false]);
        let mut rng = SmallRng::seed_from_u64(3);

        let summary = QuizSession::new(&vocab, &mut log, &log_file)
            .run(1, &mut rng, &mut io)
            .unwrap();
        assert_eq!(summary.result.corrections, vec![false]);
        assert_eq!(io.confirm_calls, 1);
        assert_eq!(log.score("cat"), -1);
        assert_eq!(log_file.load().score("cat"), -1);
    }

    #[test]
    fn test_skip_is_wrong_without_confirmation() {
        let dir = TempDir::new().unwrap();
        let log_file = LogFile::new(dir.path().join("log.json"), Default::default());
        let vocab = vocabulary(&[("a", "一"), ("b", "二")]);
        let mut log = ScoreLog::new();
        let mut io = ScriptedIo::new(&["N", ""], &[]);
        let mut rng = SmallRng::seed_from_u64(9);

        let summary = QuizSession::new(&vocab, &mut log, &log_file)
            .run(2, &mut rng, &mut io)
            .unwrap();
        assert_eq!(summary.result.corrections, vec![false, false]);
        assert_eq!(io.confirm_calls, 0);
        assert_eq!(log.score("a"), -1);
        assert_eq!(log.score("b"), -1);
    }

    #[test]
    fn test_states_advance_in_order() {
        let dir = TempDir::new().unwrap();
        let log_file = LogFile::new(dir.path().join("log.json"), Default::default());
        let vocab = vocabulary(&[("cat", "貓")]);
        let mut log = ScoreLog::new();
        let mut io = ScriptedIo::new(&[], &[true]);
        let mut rng = SmallRng::seed_from_u64(1);
        let mut session = QuizSession::new(&vocab, &mut log, &log_file);

        assert!(matches!(
            session.grade(&mut io),
            Err(VocabError::InvalidState { expected: SessionState::Grading, actual: SessionState::Idle })
        ));
        assert_eq!(session.start(1, &mut rng).unwrap(), &["cat".to_string()]);
        assert_eq!(session.state(), SessionState::CollectingAnswers);
        assert!(matches!(
            session.submit_answers(vec![]),
            Err(VocabError::AnswerCountMismatch { answers: 0, words: 1 })
        ));
        session.submit_answers(vec!["kitty".into()]).unwrap();
        assert_eq!(session.state(), SessionState::Grading);
        assert_eq!(session.grade(&mut io).unwrap().corrections, vec![true]);
        assert_eq!(session.state(), SessionState::Summarizing);
        session.summarize(&mut io).unwrap();
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_invalid_count_keeps_idle() {
        let dir = TempDir::new().unwrap();
        let log_file = LogFile::new(dir.path().join("log.json"), Default::default());
        let vocab = vocabulary(&[("cat", "貓")]);
        let mut log = ScoreLog::new();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut session = QuizSession::new(&vocab, &mut log, &log_file);

        assert!(session.start(2, &mut rng).is_err());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_save_failure_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        // A directory where the log file should be makes the rename fail.
        let blocked = dir.path().join("log.json");
        std::fs::create_dir(&blocked).unwrap();
        std::fs::write(blocked.join("keep"), "x").unwrap();
        let log_file = LogFile::new(&blocked, Default::default());
        let vocab = vocabulary(&[("cat", "貓")]);
        let mut log = ScoreLog::new();
        let mut io = ScriptedIo::new(&["貓"], &[]);
        let mut rng = SmallRng::seed_from_u64(1);

        let summary = QuizSession::new(&vocab, &mut log, &log_file)
            .run(1, &mut rng, &mut io)
            .unwrap();
        assert!(summary.save_error.is_some());
        assert_eq!(log.score("cat"), 1);
    }
}
