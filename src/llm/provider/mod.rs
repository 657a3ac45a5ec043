pub mod claude;
pub mod deepseek;
pub mod gemini;
pub mod openai;
pub mod utils;

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::Client;

use crate::config::{AppConfig, NetworkConfig, ProviderKind};
use crate::error::{GcmtError, Result};
use crate::llm::LLMProvider;

/// 全局 HTTP 客户端（共享连接池）
static HTTP_CLIENT: OnceLock<Client> = OnceLock::new();

/// 获取或创建全局 HTTP 客户端
///
/// 使用 OnceLock 确保只创建一次，所有 provider 共享同一个连接池。
/// 第一次调用时的 NetworkConfig 决定 timeout 配置。
pub(crate) fn shared_http_client(network: &NetworkConfig) -> Result<Client> {
    if let Some(client) = HTTP_CLIENT.get() {
        return Ok(client.clone());
    }

    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS
    );

    let client = Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(network.request_timeout))
        .connect_timeout(Duration::from_secs(network.connect_timeout))
        .build()
        .map_err(|e| GcmtError::Config(format!("Failed to initialize HTTP client: {e}")))?;

    let _ = HTTP_CLIENT.set(client.clone());
    Ok(client)
}

/// 根据 provider 类型创建对应的实现
///
/// API key 在这里解析（配置文件优先，其次环境变量），缺失时在任何网络
/// 请求发生前返回 [`GcmtError::MissingApiKey`]。
pub fn create_provider(kind: ProviderKind, config: &AppConfig) -> Result<Arc<dyn LLMProvider>> {
    match kind {
        ProviderKind::OpenAI => Ok(Arc::new(openai::OpenAIProvider::new(config)?)),
        ProviderKind::Gemini => Ok(Arc::new(gemini::GeminiProvider::new(config)?)),
        ProviderKind::Anthropic => Ok(Arc::new(claude::ClaudeProvider::new(config)?)),
        ProviderKind::DeepSeek => Ok(Arc::new(deepseek::DeepSeekProvider::new(config)?)),
    }
}

/// 解析 provider 的 API key
///
/// 优先级：配置文件 `[providers.<name>] api_key` > 环境变量（如
/// `OPENAI_API_KEY`）。空字符串视为未配置。
pub fn resolve_api_key(kind: ProviderKind, config: &AppConfig) -> Result<String> {
    config
        .provider(kind)
        .and_then(|p| p.api_key.clone())
        .filter(|key| !key.trim().is_empty())
        .or_else(|| {
            std::env::var(kind.env_key_var())
                .ok()
                .filter(|key| !key.trim().is_empty())
        })
        .ok_or_else(|| GcmtError::MissingApiKey(kind.as_str().to_string()))
}

/// 检查 provider 是否配置了 API key（不返回 key 本身）
pub fn has_api_key(kind: ProviderKind, config: &AppConfig) -> bool {
    resolve_api_key(kind, config).is_ok()
}

/// 从错误响应 body 中提取上游错误信息
///
/// 支持两种常见形态：`{"error": {"message": "..."}}`（OpenAI/Gemini/
/// DeepSeek/Anthropic）和 `{"error": "..."}`。
pub(crate) fn extract_api_error(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let error = value.get("error")?;

    if let Some(message) = error.get("message").and_then(|m| m.as_str()) {
        return Some(message.to_string());
    }
    error.as_str().map(|s| s.to_string())
}

/// 构造非 2xx 响应对应的 provider 错误
///
/// 优先使用上游内嵌的错误信息，否则退回原始 body。
pub(crate) fn api_error(provider: &str, status: reqwest::StatusCode, body: &str) -> GcmtError {
    let message = extract_api_error(body).unwrap_or_else(|| body.trim().to_string());
    GcmtError::Provider {
        provider: provider.to_string(),
        message: format!("({status}) {message}"),
    }
}

/// 构造传输层失败对应的 provider 错误
pub(crate) fn transport_error(provider: &str, err: reqwest::Error) -> GcmtError {
    GcmtError::Provider {
        provider: provider.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_extract_api_error_object_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(
            extract_api_error(body).as_deref(),
            Some("Incorrect API key provided")
        );
    }

    #[test]
    fn test_extract_api_error_plain_string() {
        let body = r#"{"error":"overloaded"}"#;
        assert_eq!(extract_api_error(body).as_deref(), Some("overloaded"));
    }

    #[test]
    fn test_extract_api_error_missing() {
        assert_eq!(extract_api_error(r#"{"detail":"nope"}"#), None);
        assert_eq!(extract_api_error("not json"), None);
    }

    #[test]
    fn test_api_error_falls_back_to_raw_body() {
        let err = api_error(
            "gemini",
            reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            "upstream exploded",
        );
        match err {
            GcmtError::Provider { provider, message } => {
                assert_eq!(provider, "gemini");
                assert!(message.contains("500"));
                assert!(message.contains("upstream exploded"));
            }
            other => panic!("Expected Provider error, got {other:?}"),
        }
    }
}
