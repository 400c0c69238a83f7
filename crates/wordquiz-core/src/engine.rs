//! Central quiz engine.
//!
//! Owns the profile and session stores, talks to the word source, and drives
//! the session state machine. Every operation holds a per-user lock for its
//! whole duration, so requests for the same name never interleave.

use std::sync::Arc;
use std::time::Duration;

use tracing::instrument;

use crate::error::QuizError;
use crate::model::{LearningSession, SessionMode, UserProfile, WordItem};
use crate::results::{AnswerOutcome, EndOutcome, StartOutcome};
use crate::session::TEST_QUESTION_COUNT;
use crate::store::{InMemoryStore, KeyedLocks};
use crate::traits::{KeyValueStore, WordSource};

/// Configuration for the quiz engine.
#[derive(Debug, Clone)]
pub struct QuizEngineConfig {
    /// Upper bound on a single word-source call.
    pub generation_timeout: Duration,
}

impl Default for QuizEngineConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Duration::from_secs(60),
        }
    }
}

/// The quiz engine.
pub struct QuizEngine {
    profiles: Arc<dyn KeyValueStore<UserProfile>>,
    sessions: Arc<dyn KeyValueStore<LearningSession>>,
    word_source: Arc<dyn WordSource>,
    locks: KeyedLocks,
    config: QuizEngineConfig,
}

impl QuizEngine {
    /// Create an engine backed by in-memory stores.
    pub fn new(word_source: Arc<dyn WordSource>, config: QuizEngineConfig) -> Self {
        Self::with_stores(
            Arc::new(InMemoryStore::new()),
            Arc::new(InMemoryStore::new()),
            word_source,
            config,
        )
    }

    pub fn with_stores(
        profiles: Arc<dyn KeyValueStore<UserProfile>>,
        sessions: Arc<dyn KeyValueStore<LearningSession>>,
        word_source: Arc<dyn WordSource>,
        config: QuizEngineConfig,
    ) -> Self {
        Self {
            profiles,
            sessions,
            word_source,
            locks: KeyedLocks::new(),
            config,
        }
    }

    /// Create or replace a profile.
    #[instrument(skip(self, profile), fields(user = %profile.name))]
    pub async fn setup_profile(&self, profile: UserProfile) -> Result<UserProfile, QuizError> {
        let _guard = self.locks.lock(&profile.name).await;
        self.profiles.set(&profile.name, profile.clone()).await?;
        tracing::info!(level = %profile.level, goal = %profile.goal, "profile set up");
        Ok(profile)
    }

    pub async fn profile(&self, user_name: &str) -> Result<UserProfile, QuizError> {
        self.profiles
            .get(user_name)
            .await?
            .ok_or_else(|| QuizError::NotFound(user_name.to_string()))
    }

    /// Current session for a user, if any.
    pub async fn session(&self, user_name: &str) -> Result<Option<LearningSession>, QuizError> {
        Ok(self.sessions.get(user_name).await?)
    }

    /// Generate one batch of words for a user's profile.
    #[instrument(skip(self))]
    pub async fn generate_words(&self, user_name: &str) -> Result<Vec<WordItem>, QuizError> {
        let _guard = self.locks.lock(user_name).await;
        let profile = self.profile(user_name).await?;
        let words = self.fetch_batch(&profile).await?;
        if words.is_empty() {
            return Err(QuizError::GenerationFailed(
                "word source returned no words".into(),
            ));
        }
        Ok(words)
    }

    /// Start a session, replacing any existing one for this user.
    #[instrument(skip(self), fields(mode = %mode))]
    pub async fn start_session(
        &self,
        user_name: &str,
        mode: SessionMode,
    ) -> Result<StartOutcome, QuizError> {
        let _guard = self.locks.lock(user_name).await;
        let profile = self.profile(user_name).await?;

        let words = match mode {
            SessionMode::Test => {
                let mut words = Vec::with_capacity(TEST_QUESTION_COUNT);
                while words.len() < TEST_QUESTION_COUNT {
                    let batch = self.fetch_batch(&profile).await?;
                    if batch.is_empty() {
                        return Err(QuizError::GenerationFailed(format!(
                            "word source ran dry after {} of {TEST_QUESTION_COUNT} words",
                            words.len()
                        )));
                    }
                    words.extend(batch);
                }
                words
            }
            SessionMode::Learning => self.fetch_batch(&profile).await?,
        };

        if words.is_empty() {
            return Err(QuizError::GenerationFailed(
                "could not generate words for the session".into(),
            ));
        }

        let session = LearningSession::new(user_name, mode, words);
        let Some(first) = session.current_word().cloned() else {
            return Err(QuizError::GenerationFailed(
                "session has no first word".into(),
            ));
        };
        let total_questions = session.total_questions;

        self.sessions.set(user_name, session).await?;
        tracing::info!(total_questions, "session started");

        Ok(StartOutcome {
            word: first.word,
            options: first.options,
            mode,
            total_questions,
        })
    }

    /// Grade an answer and advance the user's session.
    ///
    /// `word` is informational; the answer is always graded against the
    /// session's current word. In learning mode, running out of words fetches
    /// another batch before returning.
    #[instrument(skip(self, user_answer))]
    pub async fn submit_answer(
        &self,
        user_name: &str,
        word: &str,
        user_answer: &str,
    ) -> Result<AnswerOutcome, QuizError> {
        let _guard = self.locks.lock(user_name).await;
        let mut session = self
            .sessions
            .get(user_name)
            .await?
            .ok_or_else(|| QuizError::NoActiveSession(user_name.to_string()))?;

        if let Some(current) = session.current_word() {
            if current.word != word {
                tracing::debug!(expected = %current.word, "answer submitted for a different word");
            }
        }

        let answered = session.record_answer(user_answer)?;

        if session.needs_top_up() {
            let profile = self.profile(user_name).await?;
            let batch = self.fetch_batch(&profile).await?;
            tracing::info!(added = batch.len(), "topped up learning session");
            session.append_batch(batch);
        }

        let outcome = AnswerOutcome {
            is_correct: answered.is_correct,
            correct_meaning: answered.item.meaning.clone(),
            feedback: answered.feedback(),
            explanation: answered.explanation(),
            score: session.score(),
            progress: session.progress(),
        };

        self.sessions.set(user_name, session).await?;
        Ok(outcome)
    }

    /// End a learning session and report its accuracy.
    #[instrument(skip(self))]
    pub async fn end_learning_session(&self, user_name: &str) -> Result<EndOutcome, QuizError> {
        let _guard = self.locks.lock(user_name).await;
        let session = self
            .sessions
            .get(user_name)
            .await?
            .ok_or_else(|| QuizError::NoActiveSession(user_name.to_string()))?;

        if session.mode != SessionMode::Learning {
            return Err(QuizError::WrongMode);
        }

        self.sessions.delete(user_name).await?;

        let outcome = EndOutcome {
            final_accuracy: session.accuracy().unwrap_or(0.0),
            correct_answers: session.correct_answers,
            total_questions: session.total_questions,
        };
        tracing::info!(
            correct = outcome.correct_answers,
            total = outcome.total_questions,
            "learning session ended"
        );
        Ok(outcome)
    }

    async fn fetch_batch(&self, profile: &UserProfile) -> Result<Vec<WordItem>, QuizError> {
        let timeout = self.config.generation_timeout;
        tokio::time::timeout(
            timeout,
            self.word_source.generate(&profile.level, &profile.goal),
        )
        .await
        .map_err(|_| {
            tracing::warn!(user = %profile.name, "word generation timed out");
            QuizError::GenerationFailed(format!("timed out after {}s", timeout.as_secs()))
        })
    }
}
