//! Configuration and provider factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use wordquiz_core::engine::QuizEngineConfig;
use wordquiz_core::generator::GeneratorConfig;
use wordquiz_core::traits::LlmProvider;

use crate::gemini::GeminiProvider;
use crate::mock::MockProvider;
use crate::ollama::OllamaProvider;
use crate::openai::OpenAiProvider;

const LOCAL_CONFIG: &str = "wordquiz.toml";

/// Configuration for a single LLM provider.
///
/// Note: Custom Debug impl masks API keys to prevent accidental exposure in logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProviderConfig {
    Gemini {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
    },
    OpenAI {
        api_key: String,
        #[serde(default)]
        base_url: Option<String>,
        #[serde(default)]
        org_id: Option<String>,
    },
    Ollama {
        #[serde(default = "default_ollama_url")]
        base_url: String,
    },
    /// Offline provider that replies with a canned payload.
    Mock {
        #[serde(default)]
        response: Option<String>,
    },
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderConfig::Gemini {
                api_key: _,
                base_url,
            } => f
                .debug_struct("Gemini")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::OpenAI {
                api_key: _,
                base_url,
                org_id,
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"***")
                .field("base_url", base_url)
                .field("org_id", org_id)
                .finish(),
            ProviderConfig::Ollama { base_url } => f
                .debug_struct("Ollama")
                .field("base_url", base_url)
                .finish(),
            ProviderConfig::Mock { response } => f
                .debug_struct("Mock")
                .field("custom_response", &response.is_some())
                .finish(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Top-level wordquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordquizConfig {
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Provider used when none is given on the command line.
    #[serde(default = "default_provider")]
    pub default_provider: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_temperature")]
    pub default_temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Words requested per generation call.
    #[serde(default = "default_words_per_batch")]
    pub words_per_batch: usize,
    /// Upper bound on a single generation call.
    #[serde(default = "default_generation_timeout")]
    pub generation_timeout_secs: u64,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_provider() -> String {
    "gemini".to_string()
}
fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_max_tokens() -> u32 {
    2048
}
fn default_words_per_batch() -> usize {
    5
}
fn default_generation_timeout() -> u64 {
    60
}

impl Default for WordquizConfig {
    fn default() -> Self {
        Self {
            providers: HashMap::new(),
            default_provider: default_provider(),
            default_model: default_model(),
            default_temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            words_per_batch: default_words_per_batch(),
            generation_timeout_secs: default_generation_timeout(),
            server: ServerConfig::default(),
        }
    }
}

impl WordquizConfig {
    /// Word-source settings, optionally overriding the model.
    pub fn generator_config(&self, model: Option<&str>) -> GeneratorConfig {
        GeneratorConfig {
            model: model.unwrap_or(&self.default_model).to_string(),
            temperature: self.default_temperature,
            max_tokens: self.max_tokens,
            words_per_batch: self.words_per_batch,
        }
    }

    pub fn engine_config(&self) -> QuizEngineConfig {
        QuizEngineConfig {
            generation_timeout: Duration::from_secs(self.generation_timeout_secs),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_provider_config(config: &ProviderConfig) -> ProviderConfig {
    let opt = |v: &Option<String>| v.as_deref().map(resolve_env_vars);
    match config {
        ProviderConfig::Gemini { api_key, base_url } => ProviderConfig::Gemini {
            api_key: resolve_env_vars(api_key),
            base_url: opt(base_url),
        },
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => ProviderConfig::OpenAI {
            api_key: resolve_env_vars(api_key),
            base_url: opt(base_url),
            org_id: opt(org_id),
        },
        ProviderConfig::Ollama { base_url } => ProviderConfig::Ollama {
            base_url: resolve_env_vars(base_url),
        },
        ProviderConfig::Mock { response } => ProviderConfig::Mock {
            response: response.clone(),
        },
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `wordquiz.toml` in the current directory
/// 2. `~/.config/wordquiz/config.toml`
///
/// Environment variable overrides: `GEMINI_API_KEY`, `WORDQUIZ_OPENAI_KEY`.
pub fn load_config() -> Result<WordquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<WordquizConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => [Some(PathBuf::from(LOCAL_CONFIG)), global_config_path()]
            .into_iter()
            .flatten()
            .find(|p| p.exists()),
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<WordquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => WordquizConfig::default(),
    };

    apply_env_overrides(&mut config);

    config.providers = config
        .providers
        .iter()
        .map(|(k, v)| (k.clone(), resolve_provider_config(v)))
        .collect();

    Ok(config)
}

fn apply_env_overrides(config: &mut WordquizConfig) {
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
        let entry = config
            .providers
            .entry("gemini".into())
            .or_insert(ProviderConfig::Gemini {
                api_key: String::new(),
                base_url: None,
            });
        if let ProviderConfig::Gemini { api_key, .. } = entry {
            *api_key = key;
        }
    }

    if let Ok(key) = std::env::var("WORDQUIZ_OPENAI_KEY") {
        let entry = config
            .providers
            .entry("openai".into())
            .or_insert(ProviderConfig::OpenAI {
                api_key: String::new(),
                base_url: None,
                org_id: None,
            });
        if let ProviderConfig::OpenAI { api_key, .. } = entry {
            *api_key = key;
        }
    }
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(|h| {
        PathBuf::from(h)
            .join(".config")
            .join("wordquiz")
            .join("config.toml")
    })
}

/// Create a provider instance from its configuration.
pub fn create_provider(name: &str, config: &ProviderConfig) -> Result<Box<dyn LlmProvider>> {
    let provider: Box<dyn LlmProvider> = match config {
        ProviderConfig::Gemini { api_key, base_url } => {
            anyhow::ensure!(
                !api_key.is_empty(),
                "provider '{name}' has no API key (set GEMINI_API_KEY)"
            );
            Box::new(GeminiProvider::new(api_key, base_url.clone())?)
        }
        ProviderConfig::OpenAI {
            api_key,
            base_url,
            org_id,
        } => Box::new(OpenAiProvider::new(
            api_key,
            base_url.clone(),
            org_id.clone(),
        )?),
        ProviderConfig::Ollama { base_url } => Box::new(OllamaProvider::new(base_url)?),
        ProviderConfig::Mock { response } => match response {
            Some(text) => Box::new(MockProvider::with_fixed_response(text)),
            None => Box::new(MockProvider::default()),
        },
    };
    tracing::debug!(provider = name, kind = provider.name(), "provider created");
    Ok(provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_WORDQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_WORDQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_WORDQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("${_WORDQUIZ_UNSET_VAR}x"), "x");
        assert_eq!(resolve_env_vars("unterminated ${OOPS"), "unterminated ${OOPS");
        std::env::remove_var("_WORDQUIZ_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = WordquizConfig::default();
        assert_eq!(config.default_provider, "gemini");
        assert_eq!(config.words_per_batch, 5);
        assert_eq!(config.server.bind, "127.0.0.1:8000");
        assert_eq!(
            config.engine_config().generation_timeout,
            Duration::from_secs(60)
        );
    }

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
default_provider = "offline"
default_model = "mock-model"
words_per_batch = 3
generation_timeout_secs = 10

[providers.gemini]
type = "gemini"
api_key = "g-test"

[providers.openai]
type = "openai"
api_key = "sk-openai"

[providers.ollama]
type = "ollama"

[providers.offline]
type = "mock"

[server]
bind = "0.0.0.0:9000"
"#;
        let config: WordquizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.providers.len(), 4);
        assert!(matches!(
            config.providers.get("ollama"),
            Some(ProviderConfig::Ollama { base_url }) if base_url == "http://localhost:11434"
        ));
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.server.cors_origins.len(), 2);
        assert_eq!(config.generator_config(None).words_per_batch, 3);
        assert_eq!(config.generator_config(Some("x")).model, "x");
    }

    #[test]
    fn debug_masks_api_keys() {
        let config = ProviderConfig::Gemini {
            api_key: "super-secret".into(),
            base_url: None,
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordquiz.toml");
        std::fs::write(
            &path,
            "default_provider = \"offline\"\n[providers.offline]\ntype = \"mock\"\n",
        )
        .unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.default_provider, "offline");
        assert!(config.providers.contains_key("offline"));
    }

    #[test]
    fn missing_explicit_file_is_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/wordquiz.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn gemini_without_key_is_rejected() {
        let config = ProviderConfig::Gemini {
            api_key: String::new(),
            base_url: None,
        };
        assert!(create_provider("gemini", &config).is_err());
    }

    #[test]
    fn mock_provider_from_config() {
        let provider = create_provider("offline", &ProviderConfig::Mock { response: None }).unwrap();
        assert_eq!(provider.name(), "mock");
    }
}
