//! Session state machine.
//!
//! A session is `Active` from creation until it is finished. Test sessions
//! finish once every fixed question is answered; learning sessions finish only
//! when a top-up comes back empty (or when they are ended explicitly, which
//! deletes them). All methods here are pure; fetching words is the engine's
//! job.

use chrono::Utc;
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::{LearningSession, SessionMode, WordItem};
use crate::results::{Progress, Score};
use crate::statistics::accuracy_percentage;

/// Number of questions in a test-mode session.
pub const TEST_QUESTION_COUNT: usize = 10;

const FEEDBACK_CORRECT: &str = "正解！";
const NO_EXPLANATION: &str = "解説はありません。";

/// The word that was just answered and how it went.
#[derive(Debug, Clone)]
pub struct AnsweredWord {
    pub item: WordItem,
    pub is_correct: bool,
}

impl AnsweredWord {
    pub fn feedback(&self) -> String {
        if self.is_correct {
            FEEDBACK_CORRECT.to_string()
        } else {
            format!("不正解。正解は「{}」でした。", self.item.meaning)
        }
    }

    pub fn explanation(&self) -> String {
        if self.item.explanation.is_empty() {
            NO_EXPLANATION.to_string()
        } else {
            self.item.explanation.clone()
        }
    }
}

impl LearningSession {
    /// Create a session. Test-mode word lists are truncated to
    /// [`TEST_QUESTION_COUNT`].
    pub fn new(owner: &str, mode: SessionMode, mut words: Vec<WordItem>) -> Self {
        let total_questions = match mode {
            SessionMode::Test => {
                words.truncate(TEST_QUESTION_COUNT);
                TEST_QUESTION_COUNT as u32
            }
            SessionMode::Learning => 0,
        };

        Self {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            word_index: 0,
            correct_answers: 0,
            total_questions,
            words,
            mode,
            finished: false,
            started_at: Utc::now(),
        }
    }

    pub fn current_word(&self) -> Option<&WordItem> {
        self.words.get(self.word_index)
    }

    pub fn score(&self) -> Score {
        Score {
            correct: self.correct_answers,
            total: self.total_questions,
        }
    }

    pub fn is_finished(&self) -> bool {
        match self.mode {
            SessionMode::Test => self.word_index >= self.total_questions as usize,
            SessionMode::Learning => self.finished,
        }
    }

    /// Grade `user_answer` against the current word and advance.
    ///
    /// The comparison is exact: case-sensitive and untrimmed.
    pub fn record_answer(&mut self, user_answer: &str) -> Result<AnsweredWord, QuizError> {
        if self.is_finished() {
            return Err(QuizError::SessionExhausted);
        }
        let item = self
            .current_word()
            .cloned()
            .ok_or(QuizError::SessionExhausted)?;

        let is_correct = user_answer == item.meaning;
        if is_correct {
            self.correct_answers += 1;
        }
        self.word_index += 1;

        Ok(AnsweredWord { item, is_correct })
    }

    /// True when a learning session has run out of fetched words.
    pub fn needs_top_up(&self) -> bool {
        self.mode == SessionMode::Learning
            && !self.finished
            && self.word_index >= self.words.len()
    }

    /// Append a freshly generated batch to a learning session.
    ///
    /// An empty batch finishes the session so it never indexes past the end.
    pub fn append_batch(&mut self, batch: Vec<WordItem>) {
        if batch.is_empty() {
            self.finished = true;
            return;
        }
        self.total_questions += batch.len() as u32;
        self.words.extend(batch);
    }

    pub fn accuracy(&self) -> Option<f64> {
        accuracy_percentage(self.correct_answers, self.total_questions)
    }

    /// What to show after the latest answer.
    pub fn progress(&self) -> Progress {
        let next = if self.is_finished() {
            None
        } else {
            self.current_word()
        };

        match next {
            Some(item) => Progress::Next {
                next_word: item.word.clone(),
                next_options: item.options.clone(),
            },
            None => Progress::Finished {
                session_finished: true,
                final_accuracy: self.accuracy(),
            },
        }
    }
}
