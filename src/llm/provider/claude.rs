use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::utils::{CLAUDE_API_SUFFIX, DEFAULT_CLAUDE_BASE, complete_endpoint};
use crate::config::{AppConfig, ProviderKind};
use crate::constants::llm::DEFAULT_TEMPERATURE;
use crate::error::{GcmtError, Result};
use crate::llm::{CancellationToken, LLMProvider, PromptRequest, check_cancelled};

/// Anthropic API 版本 header 值
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude API Provider
///
/// 请求形态：单条 user 消息，风格 prompt 与 diff 拼接。
/// 认证：`x-api-key` header 加 `anthropic-version` header。
#[derive(Debug)]
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<MessagePayload>,
}

#[derive(Serialize, Deserialize)]
struct MessagePayload {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    text: String,
}

impl ClaudeProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = super::resolve_api_key(ProviderKind::Anthropic, config)?;
        let provider_config = config.provider(ProviderKind::Anthropic);

        let endpoint = complete_endpoint(
            provider_config
                .and_then(|p| p.endpoint.as_deref())
                .unwrap_or(DEFAULT_CLAUDE_BASE),
            CLAUDE_API_SUFFIX,
        );
        let model = provider_config
            .and_then(|p| p.model.clone())
            .unwrap_or_else(|| ProviderKind::Anthropic.default_model().to_string());
        let temperature = provider_config
            .and_then(|p| p.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        Ok(Self {
            client: super::shared_http_client(&config.network)?,
            api_key,
            endpoint,
            model,
            temperature,
        })
    }
}

#[async_trait]
impl LLMProvider for ClaudeProvider {
    async fn send_prompt(
        &self,
        request: &PromptRequest<'_>,
        cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        check_cancelled(cancel)?;

        let body = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: self.temperature,
            messages: vec![MessagePayload {
                role: "user".to_string(),
                content: format!("{}\n{}", request.instructions, request.diff),
            }],
        };

        tracing::debug!(
            "Claude API request: model={}, temperature={}, max_tokens={}",
            self.model,
            self.temperature,
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| super::transport_error(self.name(), e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| super::transport_error(self.name(), e))?;

        tracing::debug!("Claude API response status: {}", status);

        if !status.is_success() {
            return Err(super::api_error(self.name(), status, &response_text));
        }

        let response_body: ClaudeResponse =
            serde_json::from_str(&response_text).map_err(|e| GcmtError::Provider {
                provider: self.name().to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        let text = response_body
            .content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }

    fn name(&self) -> &str {
        "anthropic"
    }
}
