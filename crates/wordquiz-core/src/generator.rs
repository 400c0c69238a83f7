//! LLM-backed word source.
//!
//! Builds the vocabulary prompt, sends it to an [`LlmProvider`], and decodes
//! the reply. Any failure degrades to [`fallback_words`] rather than an error.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::model::WordItem;
use crate::parser::decode_word_list;
use crate::traits::{GenerateRequest, LlmProvider, WordSource, DEFAULT_SYSTEM_PROMPT};

/// Settings for [`LlmWordSource`].
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Words requested per call.
    pub words_per_batch: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".into(),
            temperature: 0.7,
            max_tokens: 2048,
            words_per_batch: 5,
        }
    }
}

/// The degraded list returned whenever generation fails.
///
/// Tagged with the sentinel words "error" and "default".
pub fn fallback_words() -> Vec<WordItem> {
    vec![
        WordItem::new(
            "error",
            "エラー",
            "単語の生成に失敗しました。",
            ["エラー", "成功", "警告", "情報"],
        ),
        WordItem::new(
            "default",
            "デフォルト",
            "初期設定の単語です。",
            ["デフォルト", "カスタム", "オプション", "設定"],
        ),
    ]
}

/// True if `words` is the fallback list.
pub fn is_fallback(words: &[WordItem]) -> bool {
    words.len() == 2 && words[0].word == "error" && words[1].word == "default"
}

/// Build the generation prompt for a learner.
pub fn build_prompt(level: &str, goal: &str, count: usize) -> String {
    format!(
        r#"あなたは英語教育の専門家です。
ユーザーの英語レベルは「{level}」、学習目標は「{goal}」です。
このユーザーに最適な英単語を{count}つ選んでください。
各単語について、以下の情報を含めてJSON形式で出力してください。
- word (英単語)
- meaning (日本語の正しい意味)
- explanation (簡単な日本語の解説)
- options (正しい意味を含む4つの選択肢の配列。他の3つはもっともらしい誤った意味であること)

JSON形式のデータのみを返してください。余計な説明やテキストは一切含めないでください。

例:
[
  {{"word": "ubiquitous", "meaning": "どこにでもある、偏在する", "explanation": "どこにでも存在すること。", "options": ["どこにでもある、偏在する", "珍しい、稀な", "特定の場所に限定された", "一時的な、はかない"]}},
  {{"word": "ephemeral", "meaning": "つかの間の、はかない", "explanation": "短命な、一時的な。", "options": ["つかの間の、はかない", "永遠の、不滅の", "巨大な、広大な", "複雑な、入り組んだ"]}}
]"#
    )
}

/// A [`WordSource`] that asks an LLM for words.
pub struct LlmWordSource {
    provider: Arc<dyn LlmProvider>,
    config: GeneratorConfig,
}

impl LlmWordSource {
    pub fn new(provider: Arc<dyn LlmProvider>, config: GeneratorConfig) -> Self {
        Self { provider, config }
    }
}

#[async_trait]
impl WordSource for LlmWordSource {
    #[instrument(skip(self), fields(provider = %self.provider.name(), model = %self.config.model))]
    async fn generate(&self, level: &str, goal: &str) -> Vec<WordItem> {
        let request = GenerateRequest {
            model: self.config.model.clone(),
            prompt: build_prompt(level, goal, self.config.words_per_batch),
            system_prompt: Some(DEFAULT_SYSTEM_PROMPT.to_string()),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = match self.provider.generate(&request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("word generation failed, using fallback list: {e:#}");
                return fallback_words();
            }
        };

        if response.content.trim().is_empty() {
            tracing::warn!("provider returned empty text, using fallback list");
            return fallback_words();
        }
        tracing::debug!(content = %response.content, "raw word payload");

        match decode_word_list(&response.content) {
            Ok(words) => {
                tracing::info!(
                    words = words.len(),
                    latency_ms = response.latency_ms,
                    "generated words"
                );
                words
            }
            Err(e) => {
                tracing::warn!("rejected word payload, using fallback list: {e}");
                fallback_words()
            }
        }
    }
}
