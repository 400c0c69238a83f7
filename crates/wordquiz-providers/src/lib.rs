//! wordquiz-providers: LLM provider integrations.
//!
//! Implements the `LlmProvider` trait for Gemini, OpenAI-compatible APIs, and
//! Ollama, and loads the `wordquiz.toml` configuration that selects between
//! them.

pub mod config;
pub mod error;
pub mod gemini;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config, ProviderConfig, ServerConfig, WordquizConfig};
pub use error::ProviderError;
