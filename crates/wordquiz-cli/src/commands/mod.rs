//! Subcommand implementations.

pub mod check;
pub mod init;
pub mod list_models;
pub mod quiz;
pub mod serve;
pub mod words;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use wordquiz_core::generator::LlmWordSource;
use wordquiz_core::QuizEngine;
use wordquiz_providers::config::load_config_from;
use wordquiz_providers::{create_provider, WordquizConfig};

/// Provider selection shared by commands that generate words.
#[derive(Args, Debug, Clone, Default)]
pub struct ProviderArgs {
    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Provider name from the config (defaults to `default_provider`)
    #[arg(long)]
    pub provider: Option<String>,

    /// Model to request (defaults to `default_model`)
    #[arg(long)]
    pub model: Option<String>,
}

impl ProviderArgs {
    pub fn load_config(&self) -> Result<WordquizConfig> {
        load_config_from(self.config.as_deref())
    }
}

/// Build an engine backed by the selected provider.
pub fn build_engine(config: &WordquizConfig, args: &ProviderArgs) -> Result<QuizEngine> {
    let name = args
        .provider
        .as_deref()
        .unwrap_or(&config.default_provider);
    let provider_config = config.providers.get(name).with_context(|| {
        format!("provider '{name}' is not configured. Run `wordquiz init` to create a config file")
    })?;

    let provider = create_provider(name, provider_config)?;
    let source = LlmWordSource::new(
        Arc::from(provider),
        config.generator_config(args.model.as_deref()),
    );
    tracing::debug!(provider = name, "word source ready");

    Ok(QuizEngine::new(Arc::new(source), config.engine_config()))
}
