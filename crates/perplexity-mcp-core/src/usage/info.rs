//! Token usage parsed from completion responses

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Token and search counters from one completion
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageInfo {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub citation_tokens: u64,
    pub num_search_queries: u64,
    pub reasoning_tokens: u64,
    pub search_context_size: Option<String>,
}

/// Parse the `usage` object of a completion response.
///
/// `response` is the completion object itself (the one holding `choices`).
/// Returns `None` when there is no `usage` object. Missing or non-numeric
/// counters read as zero; fractional counts are truncated.
pub fn parse_usage(response: &Value) -> Option<UsageInfo> {
    let usage = response.get("usage")?.as_object()?;

    let count = |key: &str| {
        usage
            .get(key)
            .and_then(Value::as_f64)
            .filter(|v| *v > 0.0)
            .map(|v| v as u64)
            .unwrap_or(0)
    };

    Some(UsageInfo {
        prompt_tokens: count("prompt_tokens"),
        completion_tokens: count("completion_tokens"),
        total_tokens: count("total_tokens"),
        citation_tokens: count("citation_tokens"),
        num_search_queries: count("num_search_queries"),
        reasoning_tokens: count("reasoning_tokens"),
        search_context_size: usage
            .get("search_context_size")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_usage() {
        let response = json!({
            "choices": [],
            "usage": {
                "prompt_tokens": 12,
                "completion_tokens": 340,
                "total_tokens": 352,
                "citation_tokens": 5000,
                "num_search_queries": 18,
                "reasoning_tokens": 77000,
                "search_context_size": "low"
            }
        });

        let usage = parse_usage(&response).unwrap();
        assert_eq!(
            usage,
            UsageInfo {
                prompt_tokens: 12,
                completion_tokens: 340,
                total_tokens: 352,
                citation_tokens: 5000,
                num_search_queries: 18,
                reasoning_tokens: 77000,
                search_context_size: Some("low".to_string()),
            }
        );
    }

    #[test]
    fn test_missing_and_malformed_fields_are_zero() {
        let response = json!({
            "usage": {
                "prompt_tokens": "12",
                "completion_tokens": 7.9,
                "search_context_size": 3
            }
        });

        let usage = parse_usage(&response).unwrap();
        assert_eq!(usage.prompt_tokens, 0);
        assert_eq!(usage.completion_tokens, 7);
        assert_eq!(usage.total_tokens, 0);
        assert_eq!(usage.search_context_size, None);
    }

    #[test]
    fn test_no_usage_object() {
        assert_eq!(parse_usage(&json!({"choices": []})), None);
        assert_eq!(parse_usage(&json!({"usage": [1, 2]})), None);
        assert_eq!(parse_usage(&json!("text")), None);
    }
}
