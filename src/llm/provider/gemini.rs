use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::utils::DEFAULT_GEMINI_BASE;
use crate::config::{AppConfig, ProviderKind};
use crate::constants::llm::DEFAULT_TEMPERATURE;
use crate::error::{GcmtError, Result};
use crate::llm::{CancellationToken, LLMProvider, PromptRequest, check_cancelled};

/// Google Gemini API provider
///
/// 请求形态：单条 content，风格 prompt 与 diff 拼接为一个 text part。
/// 认证：API key 作为 URL query 参数（`?key=...`），无认证 header。
#[derive(Debug)]
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<GeminiCandidate>>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiResponseContent>,
}

#[derive(Deserialize)]
struct GeminiResponseContent {
    #[serde(default)]
    parts: Option<Vec<GeminiResponsePart>>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    text: String,
}

impl GeminiProvider {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api_key = super::resolve_api_key(ProviderKind::Gemini, config)?;
        let provider_config = config.provider(ProviderKind::Gemini);

        let base_url = provider_config
            .and_then(|p| p.endpoint.as_deref())
            .unwrap_or(DEFAULT_GEMINI_BASE)
            .trim_end_matches('/')
            .to_string();
        let model = provider_config
            .and_then(|p| p.model.clone())
            .unwrap_or_else(|| ProviderKind::Gemini.default_model().to_string());
        let temperature = provider_config
            .and_then(|p| p.temperature)
            .unwrap_or(DEFAULT_TEMPERATURE);

        Ok(Self {
            client: super::shared_http_client(&config.network)?,
            api_key,
            base_url,
            model,
            temperature,
        })
    }

    /// 非流式端点：/v1beta/models/{model}:generateContent
    fn generate_content_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn send_prompt(
        &self,
        request: &PromptRequest<'_>,
        cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        check_cancelled(cancel)?;

        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: format!("{}\n{}", request.instructions, request.diff),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.temperature,
                max_output_tokens: request.max_tokens,
            },
        };

        tracing::debug!(
            "Gemini API request: model={}, temperature={}, max_output_tokens={}",
            self.model,
            self.temperature,
            request.max_tokens
        );

        let response = self
            .client
            .post(self.generate_content_url())
            // Gemini 的 API key 走 query 参数，无认证 header
            .query(&[("key", self.api_key.as_str())])
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

        tracing::debug!("Gemini API response status: {}", status);

        if !status.is_success() {
            return Err(super::api_error(self.name(), status, &response_text));
        }

        let response_body: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| GcmtError::Provider {
                provider: self.name().to_string(),
                message: format!("Failed to parse response: {e}"),
            })?;

        let text = response_body
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    candidates.swap_remove(0).content
                }
            })
            .and_then(|content| content.parts)
            .and_then(|mut parts| {
                if parts.is_empty() {
                    None
                } else {
                    Some(parts.swap_remove(0).text)
                }
            })
            .ok_or_else(|| GcmtError::Provider {
                provider: self.name().to_string(),
                message: "Response contained no generated text".to_string(),
            })?;

        Ok(text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
