//! Content transformation helpers for AI provider output.
//!
//! Providers return text with stray markdown formatting even in JSON mode,
//! so every structured response goes through a fence strip before parsing.

use crate::error::{ApiError, Result};
use serde::de::DeserializeOwned;

/// Strip ```json ... ``` or ``` ... ``` code fences from provider output.
/// Idempotent: already-clean text passes through unchanged.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or_else(|| stripped.trim())
    } else {
        text
    }
}

/// Parse provider output into a concrete schema type after fence stripping.
///
/// Failure is recoverable (`MALFORMED_AI_RESPONSE`): the caller should
/// surface a retry, not a fatal error. The credit for the call has already
/// been settled by the gateway at this point.
pub fn parse_ai_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|e| {
        tracing::warn!("AI response failed schema parse: {}", e);
        ApiError::MalformedAiResponse(format!("Response was not valid JSON: {}", e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Sample {
        key: String,
    }

    #[test]
    fn strips_json_tagged_fences() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn strips_untagged_fences() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn clean_text_is_untouched() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), input);
    }

    #[test]
    fn idempotent_on_repeated_application() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        let once = strip_code_fences(input);
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn handles_unterminated_fence() {
        let input = "```json\n{\"key\": \"value\"}";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn parses_fenced_json_into_schema() {
        let parsed: Sample = parse_ai_json("```json\n{\"key\": \"v\"}\n```").unwrap();
        assert_eq!(
            parsed,
            Sample {
                key: "v".to_string()
            }
        );
    }

    #[test]
    fn malformed_json_is_recoverable_error() {
        let result = parse_ai_json::<Sample>("I'd be happy to help with that!");
        match result {
            Err(ApiError::MalformedAiResponse(_)) => {}
            other => panic!("expected MalformedAiResponse, got {:?}", other.is_ok()),
        }
    }

    #[test]
    fn schema_mismatch_is_recoverable_error() {
        let result = parse_ai_json::<Sample>("{\"wrong_field\": 1}");
        assert!(matches!(result, Err(ApiError::MalformedAiResponse(_))));
    }
}
