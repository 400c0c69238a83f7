//! Core data model types for wordquiz.
//!
//! Profiles drive word generation, word items are what the learner is quizzed
//! on, and learning sessions track progress through a list of word items.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A learner's profile. The name is the unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name, used as the store key.
    pub name: String,
    /// Self-reported proficiency (e.g. "中級").
    pub level: String,
    /// Learning goal (e.g. "TOEIC 800").
    pub goal: String,
}

impl UserProfile {
    pub fn new(name: impl Into<String>, level: impl Into<String>, goal: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: level.into(),
            goal: goal.into(),
        }
    }
}

/// A vocabulary word with one correct meaning and four answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordItem {
    /// The English word.
    pub word: String,
    /// The correct meaning.
    pub meaning: String,
    /// Short explanation shown after answering.
    #[serde(default)]
    pub explanation: String,
    /// Four options, exactly one of which equals `meaning`.
    pub options: Vec<String>,
}

impl WordItem {
    pub fn new(word: &str, meaning: &str, explanation: &str, options: [&str; 4]) -> Self {
        Self {
            word: word.to_string(),
            meaning: meaning.to_string(),
            explanation: explanation.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        }
    }
}

/// How a session progresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    /// Open-ended practice, topped up with new words as it goes.
    #[default]
    Learning,
    /// Fixed-length assessment.
    Test,
}

impl fmt::Display for SessionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionMode::Learning => write!(f, "learning"),
            SessionMode::Test => write!(f, "test"),
        }
    }
}

impl FromStr for SessionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "learning" | "learn" => Ok(SessionMode::Learning),
            "test" => Ok(SessionMode::Test),
            other => Err(format!("unknown session mode: {other}")),
        }
    }
}

/// One user's in-progress quiz.
///
/// State transitions live in [`crate::session`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LearningSession {
    pub id: Uuid,
    /// Name of the profile that owns this session.
    pub owner: String,
    /// Index of the word currently being asked.
    pub word_index: usize,
    pub correct_answers: u32,
    /// Fixed for test mode, grows with each top-up in learning mode.
    pub total_questions: u32,
    pub words: Vec<WordItem>,
    pub mode: SessionMode,
    /// Set when a learning session can no longer continue.
    #[serde(default)]
    pub finished: bool,
    pub started_at: DateTime<Utc>,
}
