//! Provider utility functions
//!
//! URL completion and API key masking shared by the provider implementations.

/// OpenAI API endpoint suffix
pub const OPENAI_API_SUFFIX: &str = "/v1/chat/completions";

/// DeepSeek API endpoint suffix
pub const DEEPSEEK_API_SUFFIX: &str = "/v1/chat/completions";

/// Claude API endpoint suffix
pub const CLAUDE_API_SUFFIX: &str = "/v1/messages";

/// OpenAI default base URL
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";

/// DeepSeek default base URL
pub const DEFAULT_DEEPSEEK_BASE: &str = "https://api.deepseek.com";

/// Claude default base URL
pub const DEFAULT_CLAUDE_BASE: &str = "https://api.anthropic.com";

/// Gemini default base URL
pub const DEFAULT_GEMINI_BASE: &str = "https://generativelanguage.googleapis.com";

/// Complete an API endpoint from a configured base URL.
///
/// # Behavior
/// 1. Trailing slashes are removed
/// 2. A URL already ending with the suffix is returned as-is
/// 3. A URL with a deep custom path (two or more segments) is kept untouched
/// 4. Otherwise the suffix is appended
///
/// # Example
/// ```
/// use gcmt_rs::llm::provider::utils::complete_endpoint;
///
/// assert_eq!(
///     complete_endpoint("https://api.deepseek.com", "/v1/chat/completions"),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
/// assert_eq!(
///     complete_endpoint("https://api.deepseek.com/v1/chat/completions", "/v1/chat/completions"),
///     "https://api.deepseek.com/v1/chat/completions"
/// );
/// ```
pub fn complete_endpoint(base_url: &str, expected_suffix: &str) -> String {
    let url = base_url.trim_end_matches('/');
    let suffix = expected_suffix.trim_start_matches('/');

    if url.ends_with(suffix) {
        return url.to_string();
    }

    if is_complete_api_path(url) {
        return url.to_string();
    }

    format!("{url}/{suffix}")
}

/// Check if the URL already carries a full API path.
///
/// Heuristic: a path depth of two or more segments is treated as a
/// user-defined complete endpoint (e.g. `/v1/chat`, `/api/generate`).
fn is_complete_api_path(url: &str) -> bool {
    let path = url
        .strip_prefix("http://")
        .or_else(|| url.strip_prefix("https://"))
        .and_then(|rest| rest.split_once('/'))
        .map(|(_, path)| path)
        .unwrap_or("");

    path.split('/').filter(|s| !s.is_empty()).count() >= 2
}

/// Mask an API key to prevent log leaks.
///
/// Keys longer than 8 characters show the first and last 4 characters;
/// shorter keys are fully masked.
///
/// # Example
/// ```
/// use gcmt_rs::llm::provider::utils::mask_api_key;
///
/// assert_eq!(mask_api_key("sk-ant-api03-abcdefgh"), "sk-a...efgh");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
pub fn mask_api_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}...{}", &key[..4], &key[key.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_endpoint_basic() {
        assert_eq!(
            complete_endpoint("https://api.openai.com", "/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_with_trailing_slash() {
        assert_eq!(
            complete_endpoint("https://api.deepseek.com/", "/v1/chat/completions"),
            "https://api.deepseek.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_complete_endpoint_already_complete() {
        assert_eq!(
            complete_endpoint("https://api.anthropic.com/v1/messages", "/v1/messages"),
            "https://api.anthropic.com/v1/messages"
        );
    }

    #[test]
    fn test_complete_endpoint_custom_path_kept() {
        assert_eq!(
            complete_endpoint("https://proxy.corp.net/llm/openai", "/v1/chat/completions"),
            "https://proxy.corp.net/llm/openai"
        );
    }

    #[test]
    fn test_complete_endpoint_mockito_style_url() {
        // mockito 返回形如 http://127.0.0.1:PORT 的 URL
        assert_eq!(
            complete_endpoint("http://127.0.0.1:1234", "/v1/messages"),
            "http://127.0.0.1:1234/v1/messages"
        );
    }

    #[test]
    fn test_mask_api_key() {
        assert_eq!(mask_api_key("sk-ant-api03-abcdefgh"), "sk-a...efgh");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
        assert_eq!(mask_api_key("123456789"), "1234...6789");
    }
}
