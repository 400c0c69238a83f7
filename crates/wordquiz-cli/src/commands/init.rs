//! The `wordquiz init` command.

use std::path::Path;

use anyhow::{Context, Result};

const CONFIG_FILE: &str = "wordquiz.toml";

pub fn execute() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{CONFIG_FILE} already exists, skipping.");
        return Ok(());
    }

    std::fs::write(CONFIG_FILE, SAMPLE_CONFIG)
        .with_context(|| format!("failed to write {CONFIG_FILE}"))?;
    println!("Created {CONFIG_FILE}");

    println!("\nNext steps:");
    println!("  1. Set GEMINI_API_KEY (or edit {CONFIG_FILE})");
    println!("  2. Run: wordquiz words");
    println!("  3. Run: wordquiz quiz --mode test");

    Ok(())
}

pub(crate) const SAMPLE_CONFIG: &str = r#"# wordquiz configuration

default_provider = "gemini"
default_model = "gemini-2.5-flash"
default_temperature = 0.7
max_tokens = 2048
words_per_batch = 5
generation_timeout_secs = 60

[providers.gemini]
type = "gemini"
api_key = "${GEMINI_API_KEY}"

[providers.openai]
type = "openai"
api_key = "${WORDQUIZ_OPENAI_KEY}"

[providers.ollama]
type = "ollama"
base_url = "http://localhost:11434"

# Offline provider with a built-in word list. Try: wordquiz quiz --provider offline
[providers.offline]
type = "mock"

[server]
bind = "127.0.0.1:8000"
cors_origins = ["http://localhost", "http://localhost:3000"]
"#;
