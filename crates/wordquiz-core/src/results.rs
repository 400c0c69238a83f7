//! Result types returned by quiz operations and LLM calls.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::model::SessionMode;

/// Token usage reported by an LLM provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Running score, rendered as `correct/total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: u32,
    pub total: u32,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

impl Serialize for Score {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Returned when a session starts.
#[derive(Debug, Clone, Serialize)]
pub struct StartOutcome {
    /// The first word to ask.
    pub word: String,
    pub options: Vec<String>,
    pub mode: SessionMode,
    /// 10 for test mode, 0 for a fresh learning session.
    pub total_questions: u32,
}

/// What comes after an answered question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Progress {
    /// The session continues with another word.
    Next {
        next_word: String,
        next_options: Vec<String>,
    },
    /// No further words will be asked.
    Finished {
        session_finished: bool,
        /// Absent when no questions were counted.
        #[serde(skip_serializing_if = "Option::is_none")]
        final_accuracy: Option<f64>,
    },
}

/// Returned for every submitted answer.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub correct_meaning: String,
    /// Human-readable verdict.
    pub feedback: String,
    pub explanation: String,
    #[serde(rename = "current_score")]
    pub score: Score,
    #[serde(flatten)]
    pub progress: Progress,
}

impl AnswerOutcome {
    pub fn is_finished(&self) -> bool {
        matches!(self.progress, Progress::Finished { .. })
    }
}

/// Returned when a learning session is ended explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct EndOutcome {
    pub final_accuracy: f64,
    pub correct_answers: u32,
    pub total_questions: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_renders_as_fraction() {
        let score = Score {
            correct: 1,
            total: 10,
        };
        assert_eq!(score.to_string(), "1/10");
        assert_eq!(serde_json::to_value(score).unwrap(), "1/10");
    }

    #[test]
    fn answer_outcome_flattens_next_word() {
        let outcome = AnswerOutcome {
            is_correct: true,
            correct_meaning: "x".into(),
            feedback: "正解！".into(),
            explanation: "e".into(),
            score: Score {
                correct: 1,
                total: 10,
            },
            progress: Progress::Next {
                next_word: "ephemeral".into(),
                next_options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            },
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["current_score"], "1/10");
        assert_eq!(json["next_word"], "ephemeral");
        assert!(json.get("session_finished").is_none());
    }

    #[test]
    fn finished_outcome_omits_missing_accuracy() {
        let progress = Progress::Finished {
            session_finished: true,
            final_accuracy: None,
        };
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["session_finished"], true);
        assert!(json.get("final_accuracy").is_none());
    }
}
