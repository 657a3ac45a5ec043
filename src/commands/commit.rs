use std::sync::Arc;

use crate::commands::CommitOptions;
use crate::config::{AppConfig, ProviderKind};
use crate::constants::commit::LARGE_DIFF_THRESHOLD;
use crate::error::{GcmtError, Result};
use crate::git::{self, ChangeSummary, GitOperations, repository::GitRepository};
use crate::llm::provider::{create_provider, has_api_key};
use crate::llm::{LLMProvider, prompt::CommitStyle};
use crate::ui;

/// Provider 构造器，注入以便测试
pub type ProviderFactory<'a> = &'a dyn Fn(ProviderKind) -> Result<Arc<dyn LLMProvider>>;

/// 执行 commit 命令
pub async fn run(options: &CommitOptions, config: &AppConfig) -> Result<()> {
    let repo = GitRepository::open(None)?;
    let factory = |kind: ProviderKind| create_provider(kind, config);
    run_with_deps(options, config, &repo, &factory).await
}

/// 执行 commit 命令（可测试版本，接受注入的依赖）
pub async fn run_with_deps(
    options: &CommitOptions,
    config: &AppConfig,
    repo: &dyn GitOperations,
    make_provider: ProviderFactory<'_>,
) -> Result<()> {
    let colored = config.ui.colored;

    // 1. 检查 staged changes
    if !repo.has_staged_changes()? {
        ui::error("No staged changes found. Use 'git add' first.", colored);
        return Err(GcmtError::NoStagedChanges);
    }

    // 2. 确认意图（--yes / --dry-run 跳过）
    if config.commit.confirm
        && !options.yes
        && !options.dry_run
        && !ui::confirm("Generate a commit message for the staged changes?", true)?
    {
        return Err(GcmtError::UserCancelled);
    }

    // 3. 获取 diff（为空时退回 name-status 列表）和统计
    let diff = git::staged_payload(repo)?;
    let summary = git::staged_summary(repo)?;
    ui::step("1/4", &format!("Analyzed staged changes: {summary}"), colored);

    // 4. 解析 provider / style / language（CLI 覆盖配置）
    let provider_name = options
        .provider
        .as_deref()
        .unwrap_or(&config.commit.provider);
    let mut provider_kind: ProviderKind = provider_name.parse()?;

    let style_label = options.style.as_deref().unwrap_or(&config.commit.style);
    let style = CommitStyle::from_label(style_label);
    let language = options
        .language
        .as_deref()
        .unwrap_or(&config.commit.language);

    // 5. 费用确认：大 diff + 高成本 provider 时提示切换（非交互模式跳过）
    let interactive = !options.yes && !options.dry_run;
    if needs_cost_guard(diff.len(), provider_kind) && interactive {
        match prompt_cost_guard(diff.len(), provider_kind, &summary, colored)? {
            CostGuardChoice::Continue => {}
            CostGuardChoice::SwitchTo(fallback) => {
                provider_kind = match resolve_fallback(provider_kind, fallback, config) {
                    FallbackResolution::Switched(kind) => {
                        tracing::info!("Switched provider to {} for large diff", kind);
                        kind
                    }
                    FallbackResolution::Reverted { original, fallback } => {
                        ui::warning(
                            &format!(
                                "No API key configured for {fallback}; continuing with {original}."
                            ),
                            colored,
                        );
                        original
                    }
                };
            }
            CostGuardChoice::Cancel => return Err(GcmtError::UserCancelled),
        }
    }

    // 6. Provider 构造时解析 API key，缺失则在任何网络请求前失败
    let provider = make_provider(provider_kind)?;

    // 7. 生成（spinner 期间单个请求，无重试）
    ui::step(
        "2/4",
        &format!("Requesting {} ({})", provider.name(), style.label()),
        colored,
    );
    let spinner = ui::Spinner::new("Generating commit message...");
    let result = provider
        .generate_commit_message(&diff, style, language, None)
        .await;
    spinner.finish_and_clear();
    let message = result?;

    println!("\n{}", ui::info("Generated commit message:", colored));
    ui::message_block(&message, colored);

    if options.dry_run {
        return Ok(());
    }

    // 8. 确认 / 编辑 / 取消
    let final_message = if options.yes {
        message
    } else {
        ui::step("3/4", "Choose next action...", colored);
        match prompt_commit_action()? {
            CommitAction::Accept => message,
            CommitAction::Edit => {
                let edited = ui::edit_text(&message)?.trim().to_string();
                println!("\n{}", ui::info("Updated commit message:", colored));
                ui::message_block(&edited, colored);
                edited
            }
            CommitAction::Quit => {
                ui::warning("Commit cancelled by user.", colored);
                return Err(GcmtError::UserCancelled);
            }
        }
    };

    // 9. 提交
    ui::step("4/4", "Creating commit...", colored);
    repo.commit(&final_message)?;

    println!();
    ui::success("Commit created successfully!", colored);
    Ok(())
}

/// 大 diff 是否需要费用确认
///
/// 仅当 diff 超过阈值（15 KiB）且 provider 属于高成本集合时触发。
/// 阈值本身（恰好 15 KiB）不触发。
pub(crate) fn needs_cost_guard(diff_len: usize, provider: ProviderKind) -> bool {
    diff_len > LARGE_DIFF_THRESHOLD && provider.is_expensive()
}

/// 费用确认的用户选择
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CostGuardChoice {
    Continue,
    SwitchTo(ProviderKind),
    Cancel,
}

/// 切换低成本 provider 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FallbackResolution {
    /// 切换成功
    Switched(ProviderKind),
    /// 目标 provider 没有 API key，退回原 provider
    Reverted {
        original: ProviderKind,
        fallback: ProviderKind,
    },
}

/// 检查切换目标的 API key；缺失时退回原 provider
pub(crate) fn resolve_fallback(
    original: ProviderKind,
    fallback: ProviderKind,
    config: &AppConfig,
) -> FallbackResolution {
    if has_api_key(fallback, config) {
        FallbackResolution::Switched(fallback)
    } else {
        FallbackResolution::Reverted { original, fallback }
    }
}

fn prompt_cost_guard(
    diff_len: usize,
    provider: ProviderKind,
    summary: &ChangeSummary,
    colored: bool,
) -> Result<CostGuardChoice> {
    ui::warning(
        &format!(
            "This commit contains a large amount of changes ({:.1} KiB, {summary}), which may be expensive to process with {provider}.",
            diff_len as f64 / 1024.0
        ),
        colored,
    );

    let choice = ui::select(
        "How do you want to proceed?",
        &[
            "Continue anyway",
            "Switch to DeepSeek",
            "Switch to Gemini",
            "Cancel",
        ],
        0,
    )?;

    Ok(match choice {
        0 => CostGuardChoice::Continue,
        1 => CostGuardChoice::SwitchTo(ProviderKind::DeepSeek),
        2 => CostGuardChoice::SwitchTo(ProviderKind::Gemini),
        _ => CostGuardChoice::Cancel,
    })
}

/// 生成后的用户操作
enum CommitAction {
    Accept,
    Edit,
    Quit,
}

fn prompt_commit_action() -> Result<CommitAction> {
    let choice = ui::select(
        "Commit with this message?",
        &["Use this message", "Edit message", "Cancel"],
        0,
    )?;

    Ok(match choice {
        0 => CommitAction::Accept,
        1 => CommitAction::Edit,
        _ => CommitAction::Quit,
    })
}
