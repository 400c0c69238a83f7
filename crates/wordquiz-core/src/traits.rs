//! Collaborator traits: LLM providers, word sources, stores, and notifiers.
//!
//! `LlmProvider` is implemented by the `wordquiz-providers` crate; the rest
//! have default implementations in this crate and can be swapped freely.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::achievement::{Achievement, Acknowledgement};
use crate::model::WordItem;
use crate::results::TokenUsage;

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that turn a prompt into text.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a completion for a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List available models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate text from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-2.5-flash").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Optional system prompt override.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

/// Response from an LLM generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

/// Default system prompt for word-generation requests.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an English vocabulary tutor for Japanese learners. Respond ONLY with a JSON array. Do not wrap it in prose.";

// ---------------------------------------------------------------------------
// Word Source trait
// ---------------------------------------------------------------------------

/// Supplies vocabulary items for a learner's level and goal.
///
/// Implementations never fail: on any internal error they return a degraded
/// but valid list instead (see [`crate::generator::fallback_words`]).
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn generate(&self, level: &str, goal: &str) -> Vec<WordItem>;
}

// ---------------------------------------------------------------------------
// Key-value store trait
// ---------------------------------------------------------------------------

/// String-keyed storage for profiles and sessions.
#[async_trait]
pub trait KeyValueStore<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &str) -> anyhow::Result<Option<V>>;

    /// Insert or replace the value under `key`.
    async fn set(&self, key: &str, value: V) -> anyhow::Result<()>;

    /// Remove `key`, returning the previous value if any.
    async fn delete(&self, key: &str) -> anyhow::Result<Option<V>>;
}

// ---------------------------------------------------------------------------
// Achievement notifier trait
// ---------------------------------------------------------------------------

/// Best-effort hook that reports a completed high-score session.
#[async_trait]
pub trait AchievementNotifier: Send + Sync {
    async fn notify(&self, achievement: &Achievement) -> anyhow::Result<Acknowledgement>;
}
