use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::utils::{DEFAULT_OPENAI_BASE, OPENAI_API_SUFFIX, complete_endpoint};
use crate::config::{AppConfig, ProviderKind};
use crate::constants::llm::DEFAULT_TEMPERATURE;
use crate::error::Result;
use crate::llm::{CancellationToken, LLMProvider, PromptRequest, check_cancelled};

/// 固定的 system 消息（风格指令在 user 消息中）
const SYSTEM_PROMPT: &str =
    "You are a helpful assistant that generates concise and meaningful git commit messages.";

/// OpenAI API Provider
///
/// 请求形态：system 为固定指令，user 为风格 prompt 与 diff 拼接。
/// 认证：`Authorization: Bearer <key>`。
#[derive(Debug)]
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<MessagePayload>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct MessagePayload {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: String,
}

impl OpenAIProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = super::resolve_api_key(ProviderKind::OpenAI, config)?;
        let provider_config = config.provider(ProviderKind::OpenAI);

        let endpoint = complete_endpoint(
            provider_config
                .and_then(|p| p.endpoint.as_deref())
                .unwrap_or(DEFAULT_OPENAI_BASE),
            OPENAI_API_SUFFIX,
        );
        let model = provider_config
            .and_then(|p| p.model.clone())
            .unwrap_or_else(|| ProviderKind::OpenAI.default_model().to_string());
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
impl LLMProvider for OpenAIProvider {
    async fn send_prompt(
        &self,
        request: &PromptRequest<'_>,
        cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        check_cancelled(cancel)?;

        let body = OpenAIRequest {
            model: self.model.clone(),
            messages: vec![
                MessagePayload {
                    role: "system".to_string(),
                    content: SYSTEM_PROMPT.to_string(),
                },
                MessagePayload {
                    role: "user".to_string(),
                    content: format!("{}\n{}", request.instructions, request.diff),
                },
            ],
            temperature: self.temperature,
            max_tokens: request.max_tokens,
        };

        tracing::debug!(
            "OpenAI API request: model={}, temperature={}, max_tokens={}",
            self.model,
            self.temperature,
            request.max_tokens
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| super::transport_error(self.name(), e))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| super::transport_error(self.name(), e))?;

        tracing::debug!("OpenAI API response status: {}", status);

        if !status.is_success() {
            return Err(super::api_error(self.name(), status, &response_text));
        }

        let response_body: OpenAIResponse =
            serde_json::from_str(&response_text).map_err(|e| crate::error::GcmtError::Provider {
                provider: self.name().to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        let text = response_body
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(text)
    }

    fn name(&self) -> &str {
        "openai"
    }
}
