use std::fs;

use crate::config::{AppConfig, ProviderKind};
use crate::error::{GcmtError, Result};
use crate::git::repository::GitRepository;
use crate::git::{self, GitOperations, find_git_root};
use crate::llm::prompt::CommitStyle;
use crate::llm::provider::create_provider;

/// Hook marker used to identify hooks installed by gcmt-rs
const HOOK_MARKER: &str = "gcmt-rs hook run";

/// Shell script content for the prepare-commit-msg hook
const HOOK_SCRIPT: &str = r#"#!/bin/sh
# gcmt-rs prepare-commit-msg hook
# Installed by: gcmt-rs hook install
# To remove: gcmt-rs hook uninstall
if ! command -v gcmt-rs >/dev/null 2>&1; then
    exit 0
fi
gcmt-rs hook run "$1" "$2" "$3"
"#;

/// Install the prepare-commit-msg hook into the current git repository.
///
/// If the hook already exists and was installed by gcmt-rs, prints an info
/// message. If the hook already exists but was NOT installed by gcmt-rs,
/// requires `--force` to overwrite.
pub fn install(force: bool) -> Result<()> {
    let git_root = find_git_root()
        .ok_or_else(|| GcmtError::GitCommand("Not in a git repository".to_string()))?;

    let hooks_dir = git_root.join(".git").join("hooks");
    fs::create_dir_all(&hooks_dir)?;

    let hook_path = hooks_dir.join("prepare-commit-msg");

    if hook_path.exists() {
        let content = fs::read_to_string(&hook_path)?;

        if content.contains(HOOK_MARKER) {
            eprintln!("Hook already installed at {}", hook_path.display());
            return Ok(());
        }

        if !force {
            eprintln!(
                "A prepare-commit-msg hook already exists at {}. Use --force to overwrite.",
                hook_path.display()
            );
            return Ok(());
        }

        eprintln!("Overwriting existing hook at {}", hook_path.display());
    }

    fs::write(&hook_path, HOOK_SCRIPT)?;

    // Set executable permission on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o755);
        fs::set_permissions(&hook_path, perms)?;
    }

    eprintln!("Installed prepare-commit-msg hook at {}", hook_path.display());

    Ok(())
}

/// Uninstall the prepare-commit-msg hook from the current git repository.
///
/// Only removes the hook if it was installed by gcmt-rs (contains the
/// marker).
pub fn uninstall() -> Result<()> {
    let git_root = find_git_root()
        .ok_or_else(|| GcmtError::GitCommand("Not in a git repository".to_string()))?;

    let hook_path = git_root
        .join(".git")
        .join("hooks")
        .join("prepare-commit-msg");

    if !hook_path.exists() {
        eprintln!("No prepare-commit-msg hook found");
        return Ok(());
    }

    let content = fs::read_to_string(&hook_path)?;
    if !content.contains(HOOK_MARKER) {
        eprintln!("Existing hook was not installed by gcmt-rs, leaving it in place");
        return Ok(());
    }

    fs::remove_file(&hook_path)?;

    eprintln!("Removed prepare-commit-msg hook at {}", hook_path.display());

    Ok(())
}

/// Safe wrapper for `run_hook_inner` that catches and prints errors to
/// stderr.
///
/// Called by the prepare-commit-msg hook script. Errors are printed but do
/// not cause git commit to fail (exit code 0).
pub async fn run_hook_safe(
    commit_msg_file: &str,
    source: &str,
    config: &AppConfig,
    provider_override: Option<&str>,
) {
    if let Err(e) = run_hook_inner(commit_msg_file, source, config, provider_override).await {
        eprintln!("gcmt-rs: {e}");
    }
}

/// Internal hook logic that generates a commit message and writes it to the
/// commit message file git passed in.
///
/// Skips generation when the commit source indicates the message was already
/// provided (message, merge, commit, squash).
async fn run_hook_inner(
    commit_msg_file: &str,
    source: &str,
    config: &AppConfig,
    provider_override: Option<&str>,
) -> Result<()> {
    // Skip when git already has a message source
    match source {
        "message" | "merge" | "commit" | "squash" => return Ok(()),
        _ => {}
    }

    let repo = GitRepository::open(None)?;

    if !repo.has_staged_changes()? {
        return Ok(());
    }

    let diff = git::staged_payload(&repo)?;

    let provider_kind: ProviderKind = provider_override
        .unwrap_or(&config.commit.provider)
        .parse()?;
    let style = CommitStyle::from_label(&config.commit.style);

    let provider = create_provider(provider_kind, config)?;

    // stdout must not be used in hooks
    eprintln!("gcmt-rs: generating commit message...");

    let message = provider
        .generate_commit_message(&diff, style, &config.commit.language, None)
        .await?;

    fs::write(commit_msg_file, &message)?;

    eprintln!("gcmt-rs: commit message written");

    Ok(())
}
