//! LLM abstractions, shared types, and provider traits.
//!
//! This module defines the provider interface used by the commit generation
//! flow.

/// Prompt-building utilities for the commit flow.
pub mod prompt;
/// Built-in provider implementations and factory helpers.
pub mod provider;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{GcmtError, Result};
use prompt::CommitStyle;

/// Cooperative cancellation flag for an in-flight generation.
///
/// The interactive flow currently never cancels a started request, but the
/// token is part of the provider call signature so timeout/cancel support can
/// be added without changing the trait.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the operation as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A fully rendered generation request.
///
/// `instructions` is the style/language prompt from
/// [`prompt::build_style_prompt`]; `diff` is the raw payload. Providers
/// combine the two according to their own message conventions (single user
/// message, or system/user split).
#[derive(Debug, Clone, Copy)]
pub struct PromptRequest<'a> {
    /// Style- and language-specific instruction text.
    pub instructions: &'a str,
    /// Staged diff (or name-status fallback listing).
    pub diff: &'a str,
    /// Generation token budget derived from the style.
    pub max_tokens: u32,
}

/// Unified interface implemented by all LLM providers.
///
/// # Architecture
///
/// The only **required** method is [`send_prompt`], which issues exactly one
/// HTTP request and returns the raw response text. The higher-level
/// [`generate_commit_message`] is a default implementation that renders the
/// prompt, delegates to `send_prompt`, and trims the result.
///
/// # Implementer Notes
/// 1. Implement `Send + Sync` (required in async contexts).
/// 2. Map every transport or non-2xx failure to
///    [`GcmtError::Provider`](crate::error::GcmtError::Provider), carrying
///    the upstream error message when the body contains one.
/// 3. Check the cancellation token before dispatching.
///
/// [`send_prompt`]: LLMProvider::send_prompt
/// [`generate_commit_message`]: LLMProvider::generate_commit_message
#[async_trait]
pub trait LLMProvider: Send + Sync + std::fmt::Debug {
    /// Sends one fully rendered prompt to the provider.
    ///
    /// Issues a single network request; no retries, no partial results.
    async fn send_prompt(
        &self,
        request: &PromptRequest<'_>,
        cancel: Option<&CancellationToken>,
    ) -> Result<String>;

    /// Provider name (used for logs and error messages).
    fn name(&self) -> &str;

    /// Convenience: generates a commit message from a diff payload.
    ///
    /// Builds the instruction prompt via
    /// [`prompt::build_style_prompt`], delegates to
    /// [`send_prompt`](Self::send_prompt), and trims surrounding whitespace
    /// from the response.
    async fn generate_commit_message(
        &self,
        diff: &str,
        style: CommitStyle,
        language: &str,
        cancel: Option<&CancellationToken>,
    ) -> Result<String> {
        let instructions = prompt::build_style_prompt(style, language);
        let request = PromptRequest {
            instructions: &instructions,
            diff,
            max_tokens: style.max_tokens(),
        };

        let response = self.send_prompt(&request, cancel).await?;
        tracing::debug!("Generated commit message: {}", response);
        Ok(response.trim().to_string())
    }
}

/// Shared pre-dispatch cancellation check.
pub(crate) fn check_cancelled(cancel: Option<&CancellationToken>) -> Result<()> {
    if cancel.is_some_and(CancellationToken::is_cancelled) {
        return Err(GcmtError::UserCancelled);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_token_starts_clear() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(check_cancelled(Some(&token)).is_ok());
    }

    #[test]
    fn test_cancellation_token_cancel_is_shared() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(
            check_cancelled(Some(&token)),
            Err(GcmtError::UserCancelled)
        ));
    }

    #[test]
    fn test_check_cancelled_none_is_ok() {
        assert!(check_cancelled(None).is_ok());
    }
}
