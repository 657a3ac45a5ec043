use thiserror::Error;

pub type Result<T> = std::result::Result<T, GcmtError>;

#[derive(Error, Debug)]
pub enum GcmtError {
    #[error("Git error: {0}")]
    Git(#[from] git2::Error),

    #[error("Git command failed: {0}")]
    GitCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unsupported provider: {0}")]
    UnsupportedProvider(String),

    #[error("No API key configured for provider '{0}'")]
    MissingApiKey(String),

    #[error("{provider} API error: {message}")]
    Provider { provider: String, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Configuration parsing error: {0}")]
    ConfigParse(#[from] config::ConfigError),

    #[error("UI error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error("No staged changes found")]
    NoStagedChanges,

    #[error("Operation cancelled by user")]
    UserCancelled,
}

impl GcmtError {
    /// 获取错误的解决建议
    pub fn suggestion(&self) -> Option<String> {
        match self {
            GcmtError::NoStagedChanges => {
                Some("Run 'git add <files>' to stage your changes first".to_string())
            }
            GcmtError::UnsupportedProvider(_) => {
                Some("Supported providers: openai, gemini, anthropic, deepseek".to_string())
            }
            GcmtError::MissingApiKey(provider) => Some(format!(
                "Add 'api_key = \"...\"' to [providers.{provider}] in ~/.config/gcmt/config.toml, or set {}",
                crate::config::env_key_var_for(provider)
            )),
            GcmtError::Network(_) => Some(
                "Check your network connection, proxy settings, or API endpoint configuration"
                    .to_string(),
            ),
            GcmtError::Provider { message, .. } if message.contains("401") => {
                Some("Check if your API key is valid and has not expired".to_string())
            }
            GcmtError::Provider { message, .. } if message.contains("429") => Some(
                "Rate limit exceeded. Wait a moment and try again, or upgrade your API plan"
                    .to_string(),
            ),
            GcmtError::Provider { message, .. }
                if message.contains("500") || message.contains("503") =>
            {
                Some(
                    "API service is temporarily unavailable. Try again in a few moments"
                        .to_string(),
                )
            }
            _ => None,
        }
    }
}
