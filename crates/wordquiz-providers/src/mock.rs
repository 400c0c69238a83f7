//! Mock provider for offline use and testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use wordquiz_core::results::TokenUsage;
use wordquiz_core::traits::{GenerateRequest, GenerateResponse, LlmProvider, ModelInfo};

/// A five-word payload in the shape real providers are asked for.
pub const SAMPLE_WORD_PAYLOAD: &str = r#"```json
[
  {"word": "ubiquitous", "meaning": "どこにでもある、偏在する", "explanation": "どこにでも存在すること。", "options": ["どこにでもある、偏在する", "珍しい、稀な", "特定の場所に限定された", "一時的な、はかない"]},
  {"word": "ephemeral", "meaning": "つかの間の、はかない", "explanation": "短命な、一時的な。", "options": ["永遠の、不滅の", "つかの間の、はかない", "巨大な、広大な", "複雑な、入り組んだ"]},
  {"word": "benevolent", "meaning": "慈悲深い、親切な", "explanation": "他人に善意を持つこと。", "options": ["意地悪な", "無関心な", "慈悲深い、親切な", "臆病な"]},
  {"word": "cacophony", "meaning": "不協和音、耳障りな音", "explanation": "不快な音の混ざり合い。", "options": ["調和のとれた旋律", "静寂", "かすかな囁き", "不協和音、耳障りな音"]},
  {"word": "dichotomy", "meaning": "二分、両極端", "explanation": "二つに分かれていること。", "options": ["二分、両極端", "統一、融合", "曖昧さ", "循環"]}
]
```"#;

enum Reply {
    Text(String),
    Fail(String),
}

/// A mock LLM provider.
///
/// Returns configurable responses based on prompt content matching, or fails
/// every call when built with [`MockProvider::failing`].
pub struct MockProvider {
    /// Map of prompt substring → response text.
    responses: HashMap<String, String>,
    default_reply: Reply,
    call_count: AtomicU32,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl MockProvider {
    /// Create a mock with prompt→response mappings, defaulting to
    /// [`SAMPLE_WORD_PAYLOAD`].
    pub fn new(responses: HashMap<String, String>) -> Self {
        Self {
            responses,
            default_reply: Reply::Text(SAMPLE_WORD_PAYLOAD.to_string()),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Create a mock that always returns the same response.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            default_reply: Reply::Text(response.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    /// Create a mock whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            default_reply: Reply::Fail(message.to_string()),
            ..Self::new(HashMap::new())
        }
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        let matched = self
            .responses
            .iter()
            .find(|(key, _)| request.prompt.contains(key.as_str()))
            .map(|(_, v)| v.clone());

        let content = match (matched, &self.default_reply) {
            (Some(content), _) => content,
            (None, Reply::Text(content)) => content.clone(),
            (None, Reply::Fail(message)) => anyhow::bail!("{message}"),
        };

        let prompt_tokens = (request.prompt.len() / 4) as u32; // rough estimate
        let completion_tokens = (content.len() / 4) as u32;

        Ok(GenerateResponse {
            content,
            model: request.model.clone(),
            token_usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }

    fn available_models(&self) -> Vec<ModelInfo> {
        vec![ModelInfo {
            id: "mock-model".into(),
            name: "Mock Model".into(),
            provider: "mock".into(),
            max_context: 100_000,
        }]
    }
}
