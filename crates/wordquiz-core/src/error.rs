//! Quiz and decoding error types.
//!
//! `QuizError` is what callers of the engine see. `DecodeError` describes why
//! a word-list payload was rejected before it reached a session.

use thiserror::Error;

/// Errors returned by [`crate::engine::QuizEngine`] operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// No profile exists for this user name.
    #[error("user '{0}' not found, set up a profile first")]
    NotFound(String),

    /// The word source produced no words, or timed out.
    #[error("could not generate words: {0}")]
    GenerationFailed(String),

    /// The user has no session to answer or end.
    #[error("no active learning session for '{0}'")]
    NoActiveSession(String),

    /// Every question in the session has already been answered.
    #[error("no more words in this session")]
    SessionExhausted,

    /// Only learning-mode sessions can be ended explicitly.
    #[error("this operation is only for learning mode sessions")]
    WrongMode,

    /// The requested mode string is not a known session mode.
    #[error("invalid session mode: {0}")]
    InvalidMode(String),

    /// The backing store failed.
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Why a word-list payload was rejected.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload was empty, or decoded to an empty list.
    #[error("payload contains no words")]
    Empty,

    /// The payload is not a JSON array of word objects.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required text field is blank.
    #[error("item {index}: field '{field}' is blank")]
    BlankField { index: usize, field: &'static str },

    /// Options must hold exactly four entries.
    #[error("item {index}: expected 4 options, found {found}")]
    OptionCount { index: usize, found: usize },

    /// The correct meaning is not among the options.
    #[error("item {index}: meaning is not one of the options")]
    MeaningNotInOptions { index: usize },

    /// The correct meaning is listed more than once.
    #[error("item {index}: meaning appears {count} times in options")]
    DuplicateMeaning { index: usize, count: usize },
}
