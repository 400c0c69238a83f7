//! wordquiz-core: Quiz engine, collaborator traits, and word-list decoding.
//!
//! This crate defines the data model, the session state machine, and the
//! seams (word source, key-value store, achievement notifier) that the rest
//! of wordquiz plugs into.

pub mod achievement;
pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod results;
pub mod session;
pub mod statistics;
pub mod store;
pub mod traits;

pub use engine::{QuizEngine, QuizEngineConfig};
pub use error::{DecodeError, QuizError};
pub use model::{LearningSession, SessionMode, UserProfile, WordItem};
