//! Configuration data structures.
//!
//! Defines the runtime config schema used by file loading, environment
//! overrides, and command execution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::GcmtError;

/// Application configuration.
///
/// Effective configuration is merged from multiple sources (low to high):
/// 1. Rust defaults (`Default` + `serde(default)`)
/// 2. User-level config file (platform-specific config directory)
/// 3. `GCMT__*` environment variables
///
/// # Configuration File Locations
/// - Linux: `~/.config/gcmt/config.toml`
/// - macOS: `~/Library/Application Support/gcmt/config.toml`
/// - Windows: `%APPDATA%\gcmt\config\config.toml`
///
/// # Example
/// ```toml
/// [commit]
/// provider = "openai"
/// style = "Normal - Up to 500 characters"
/// language = "English"
///
/// [providers.openai]
/// api_key = "sk-..."
/// model = "gpt-4o"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AppConfig {
    /// Commit generation settings.
    #[serde(default)]
    pub commit: CommitConfig,

    /// Provider settings keyed by provider name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,

    /// Terminal UI behavior.
    #[serde(default)]
    pub ui: UIConfig,

    /// HTTP timeout settings.
    #[serde(default)]
    pub network: NetworkConfig,
}

impl AppConfig {
    /// Returns the configured settings for one provider, if present.
    pub fn provider(&self, kind: ProviderKind) -> Option<&ProviderConfig> {
        self.providers.get(kind.as_str())
    }
}

/// Remote LLM provider identity.
///
/// A closed set: each variant carries its endpoint convention, request and
/// response shape, and API-key lookup. Unknown identifiers are rejected when
/// parsing, before any client is constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI chat completions API.
    OpenAI,
    /// Google Gemini generateContent API.
    Gemini,
    /// Anthropic messages API.
    Anthropic,
    /// DeepSeek chat completions API (OpenAI-shaped).
    DeepSeek,
}

/// All supported providers, in display order.
pub const ALL_PROVIDERS: [ProviderKind; 4] = [
    ProviderKind::OpenAI,
    ProviderKind::Gemini,
    ProviderKind::Anthropic,
    ProviderKind::DeepSeek,
];

impl ProviderKind {
    /// Canonical lowercase identifier (config keys, error messages).
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Gemini => "gemini",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::DeepSeek => "deepseek",
        }
    }

    /// Returns the default model name for this provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "gpt-4o",
            ProviderKind::Gemini => "gemini-2.0-flash",
            ProviderKind::Anthropic => "claude-3-sonnet-20240229",
            ProviderKind::DeepSeek => "deepseek-chat",
        }
    }

    /// Environment variable consulted when the config file has no API key.
    pub fn env_key_var(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "OPENAI_API_KEY",
            ProviderKind::Gemini => "GEMINI_API_KEY",
            ProviderKind::Anthropic => "ANTHROPIC_API_KEY",
            ProviderKind::DeepSeek => "DEEPSEEK_API_KEY",
        }
    }

    /// Whether a large diff should trigger the cost confirmation for this
    /// provider.
    pub fn is_expensive(&self) -> bool {
        matches!(self, ProviderKind::OpenAI | ProviderKind::Anthropic)
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProviderKind {
    type Err = GcmtError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(ProviderKind::OpenAI),
            "gemini" => Ok(ProviderKind::Gemini),
            "anthropic" | "claude" => Ok(ProviderKind::Anthropic),
            "deepseek" => Ok(ProviderKind::DeepSeek),
            _ => Err(GcmtError::UnsupportedProvider(s.to_string())),
        }
    }
}

/// API-key environment variable name for an arbitrary provider identifier.
///
/// Used in error suggestions where only the raw string is available.
pub fn env_key_var_for(provider: &str) -> &'static str {
    provider
        .parse::<ProviderKind>()
        .map(|kind| kind.env_key_var())
        .unwrap_or("the provider's API key environment variable")
}

/// Commit generation configuration.
///
/// # Fields
/// - `provider`: provider identifier (default: `"openai"`)
/// - `style`: message style label (default: `"Normal - Up to 500 characters"`)
/// - `language`: language of the generated message (default: `"English"`)
/// - `confirm`: ask before generating (default: `true`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommitConfig {
    /// Provider identifier, matching a key under `[providers.<name>]`.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Message style label. Unrecognized labels fall back to Normal.
    #[serde(default = "default_style")]
    pub style: String,

    /// Language of the generated commit message. Free-form, not validated.
    #[serde(default = "default_language")]
    pub language: String,

    /// Whether to confirm intent before generating.
    #[serde(default = "default_true")]
    pub confirm: bool,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            style: default_style(),
            language: default_language(),
            confirm: true,
        }
    }
}

/// Provider configuration.
///
/// Settings for one entry under `[providers.<name>]`.
///
/// # Example
/// ```toml
/// [providers.anthropic]
/// api_key = "sk-ant-..."
/// model = "claude-3-sonnet-20240229"
/// temperature = 0.5
/// endpoint = "https://api.anthropic.com" # optional
/// ```
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct ProviderConfig {
    /// API endpoint base URL. The API path suffix is completed automatically.
    pub endpoint: Option<String>,

    /// API key. Falls back to the provider's environment variable when unset.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Model name. Falls back to the provider default when unset.
    pub model: Option<String>,

    /// Sampling temperature in `0.0..=2.0`.
    pub temperature: Option<f32>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use crate::llm::provider::utils::mask_api_key;
        let masked_key = self.api_key.as_deref().map(mask_api_key);
        f.debug_struct("ProviderConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &masked_key)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

/// UI configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UIConfig {
    /// Whether to enable color output.
    #[serde(default = "default_true")]
    pub colored: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self { colored: true }
    }
}

/// HTTP network configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Whole-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_style() -> String {
    "Normal - Up to 500 characters".to_string()
}

fn default_language() -> String {
    "English".to_string()
}

fn default_request_timeout() -> u64 {
    crate::constants::network::DEFAULT_REQUEST_TIMEOUT
}

fn default_connect_timeout() -> u64 {
    crate::constants::network::DEFAULT_CONNECT_TIMEOUT
}
