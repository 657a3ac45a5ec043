//! Commit message prompt construction.
//!
//! Pure string templating: a style selection plus a target language renders
//! one of three fixed instruction templates. No side effects, no errors.

use crate::constants::llm::{CONCISE_MAX_TOKENS, DETAILED_MAX_TOKENS, NORMAL_MAX_TOKENS};

/// Commit message verbosity profile.
///
/// Selects the instruction template and the generation token budget.
/// Parsed from the configured label; unrecognized labels fall back to
/// [`Normal`](CommitStyle::Normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommitStyle {
    /// Single-line message, total length near 100 characters.
    Concise,
    /// Short description plus optional body, under 500 characters.
    #[default]
    Normal,
    /// Structured multi-point explanation, no hard cap.
    Detailed,
}

impl CommitStyle {
    /// Parses a style from its configured label.
    ///
    /// Accepts the full labels (`"Concise - Up to 100 characters"`, ...) as
    /// well as the bare words `concise` / `normal` / `detailed`, case
    /// insensitively. Anything else falls back to `Normal`.
    pub fn from_label(label: &str) -> Self {
        let keyword = label.split(" -").next().unwrap_or(label).trim();
        match keyword.to_lowercase().as_str() {
            "concise" => CommitStyle::Concise,
            "normal" => CommitStyle::Normal,
            "detailed" => CommitStyle::Detailed,
            _ => CommitStyle::Normal,
        }
    }

    /// Canonical configuration label.
    pub fn label(&self) -> &'static str {
        match self {
            CommitStyle::Concise => "Concise - Up to 100 characters",
            CommitStyle::Normal => "Normal - Up to 500 characters",
            CommitStyle::Detailed => "Detailed - No character limit",
        }
    }

    /// Generation token budget for this style.
    pub fn max_tokens(&self) -> u32 {
        match self {
            CommitStyle::Concise => CONCISE_MAX_TOKENS,
            CommitStyle::Normal => NORMAL_MAX_TOKENS,
            CommitStyle::Detailed => DETAILED_MAX_TOKENS,
        }
    }
}

/// Shared format contract, prepended to every style template.
const BASE_RULES: &str = "You are a helpful AI assistant that generates meaningful and concise git commit messages.
Based on the diff provided, create a commit message following these guidelines:

Follow the Conventional Commits format: <type>(<scope>): <description>

Types: feat, fix, docs, style, refactor, perf, test, build, ci, chore

Scope is optional and should reflect the component being changed";

const CONCISE_RULES: &str = "Description should be very concise (max 72 chars), use imperative mood, and not end with a period.
Keep the entire commit message under 100 characters if possible.
Focus only on the most important change.";

const NORMAL_RULES: &str = "Description should be concise (max 72 chars), use imperative mood, and not end with a period.
If needed, add a short paragraph after a blank line explaining the change.
Keep the entire commit message under 500 characters.
Include relevant details from the diff (files changed, key changes).";

const DETAILED_RULES: &str = "Description should be clear (max 100 chars), use imperative mood, and not end with a period.
After a blank line, include a detailed explanation of:
- What was changed and why
- Key implementation details
- Any trade-offs or design decisions
- References to issues or tickets if applicable
Include a comprehensive overview of the files changed and their purpose.";

/// Renders the instruction prompt for a style and target language.
///
/// The diff itself is not part of the result; providers attach it according
/// to their own message conventions.
pub fn build_style_prompt(style: CommitStyle, language: &str) -> String {
    let style_rules = match style {
        CommitStyle::Concise => CONCISE_RULES,
        CommitStyle::Normal => NORMAL_RULES,
        CommitStyle::Detailed => DETAILED_RULES,
    };

    format!(
        "{BASE_RULES}\n\nImportant: Generate the commit message in {language} language.\n\n{style_rules}\n\nDiff content:"
    )
}
