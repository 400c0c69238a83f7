//! Word-list payload decoder.
//!
//! LLM output is loosely structured: it may be wrapped in a markdown code
//! fence and may not respect the option rules. Everything goes through
//! [`decode_word_list`] before a session sees it.

use serde::Deserialize;

use crate::error::DecodeError;
use crate::model::WordItem;

/// Number of answer options every word item carries.
pub const OPTION_COUNT: usize = 4;

#[derive(Debug, Deserialize)]
struct RawWordItem {
    word: String,
    meaning: String,
    #[serde(default)]
    explanation: Option<String>,
    options: Vec<String>,
}

/// Strip a surrounding markdown code fence, if present.
///
/// Handles ```` ```json ````, bare ```` ``` ````, and any other language tag
/// on the opening line. A missing closing fence is tolerated.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the language tag on the opening line.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };

    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}

/// Decode and validate a word-list payload.
pub fn decode_word_list(text: &str) -> Result<Vec<WordItem>, DecodeError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    let raw: Vec<RawWordItem> = serde_json::from_str(body)?;
    if raw.is_empty() {
        return Err(DecodeError::Empty);
    }

    raw.into_iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect()
}

fn validate_item(index: usize, raw: RawWordItem) -> Result<WordItem, DecodeError> {
    if raw.word.trim().is_empty() {
        return Err(DecodeError::BlankField {
            index,
            field: "word",
        });
    }
    if raw.meaning.trim().is_empty() {
        return Err(DecodeError::BlankField {
            index,
            field: "meaning",
        });
    }
    if raw.options.len() != OPTION_COUNT {
        return Err(DecodeError::OptionCount {
            index,
            found: raw.options.len(),
        });
    }

    let count = raw.options.iter().filter(|o| **o == raw.meaning).count();
    match count {
        0 => return Err(DecodeError::MeaningNotInOptions { index }),
        1 => {}
        count => return Err(DecodeError::DuplicateMeaning { index, count }),
    }

    Ok(WordItem {
        word: raw.word,
        meaning: raw.meaning,
        explanation: raw.explanation.unwrap_or_default(),
        options: raw.options,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"[
      {"word": "ubiquitous", "meaning": "どこにでもある、偏在する", "explanation": "どこにでも存在すること。", "options": ["どこにでもある、偏在する", "珍しい、稀な", "特定の場所に限定された", "一時的な、はかない"]},
      {"word": "ephemeral", "meaning": "つかの間の、はかない", "explanation": "短命な、一時的な。", "options": ["永遠の、不滅の", "つかの間の、はかない", "巨大な、広大な", "複雑な、入り組んだ"]}
    ]"#;

    #[test]
    fn decode_plain_array() {
        let words = decode_word_list(VALID).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].word, "ubiquitous");
        assert_eq!(words[1].options[1], "つかの間の、はかない");
    }

    #[test]
    fn decode_json_fenced_payload() {
        let fenced = format!("```json\n{VALID}\n```");
        let words = decode_word_list(&fenced).unwrap();
        assert_eq!(words.len(), 2);
    }

    #[test]
    fn decode_bare_fence_with_surrounding_whitespace() {
        let fenced = format!("\n  ```\n{VALID}\n```  \n");
        assert_eq!(decode_word_list(&fenced).unwrap().len(), 2);
    }

    #[test]
    fn strip_unclosed_fence() {
        assert_eq!(strip_code_fence("```json\n[1, 2]"), "[1, 2]");
        assert_eq!(strip_code_fence("[1, 2]"), "[1, 2]");
    }

    #[test]
    fn missing_explanation_defaults_to_empty() {
        let payload = r#"[{"word":"a","meaning":"x","options":["x","y","z","w"]}]"#;
        let words = decode_word_list(payload).unwrap();
        assert_eq!(words[0].explanation, "");
    }

    #[test]
    fn reject_empty_payloads() {
        assert!(matches!(decode_word_list(""), Err(DecodeError::Empty)));
        assert!(matches!(decode_word_list("```json\n```"), Err(DecodeError::Empty)));
        assert!(matches!(decode_word_list("[]"), Err(DecodeError::Empty)));
    }

    #[test]
    fn reject_non_json() {
        let err = decode_word_list("Here are your words: ubiquitous").unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn reject_wrong_option_count() {
        let payload = r#"[{"word":"a","meaning":"x","options":["x","y","z"]}]"#;
        let err = decode_word_list(payload).unwrap_err();
        assert!(matches!(err, DecodeError::OptionCount { index: 0, found: 3 }));
    }

    #[test]
    fn reject_meaning_missing_from_options() {
        let payload = r#"[
          {"word":"a","meaning":"x","options":["x","y","z","w"]},
          {"word":"b","meaning":"q","options":["x","y","z","w"]}
        ]"#;
        let err = decode_word_list(payload).unwrap_err();
        assert!(matches!(err, DecodeError::MeaningNotInOptions { index: 1 }));
    }

    #[test]
    fn reject_duplicated_meaning() {
        let payload = r#"[{"word":"a","meaning":"x","options":["x","x","z","w"]}]"#;
        let err = decode_word_list(payload).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::DuplicateMeaning { index: 0, count: 2 }
        ));
    }

    #[test]
    fn reject_blank_word() {
        let payload = r#"[{"word":"  ","meaning":"x","options":["x","y","z","w"]}]"#;
        let err = decode_word_list(payload).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BlankField {
                index: 0,
                field: "word"
            }
        ));
    }
}
