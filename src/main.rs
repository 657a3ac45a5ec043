use gcmt_rs::*;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, HookAction};
use error::GcmtError;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 根据 verbose 标志设置日志级别
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    // 初始化 tracing 日志
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into()),
        )
        .init();

    // commit/hook 需要完整配置；管理命令允许在配置损坏时运行
    let needs_config = matches!(&cli.command, Commands::Commit { .. } | Commands::Hook { .. });
    let config = if needs_config {
        config::load_config()?
    } else {
        config::load_config().unwrap_or_default()
    };

    let colored = config.ui.colored;

    // 创建 tokio 运行时
    let rt = Runtime::new()?;

    rt.block_on(async {
        match cli.command {
            Commands::Commit {
                yes,
                dry_run,
                ref style,
                ref language,
            } => {
                let options = commands::CommitOptions {
                    yes,
                    dry_run,
                    provider: cli.provider.clone(),
                    style: style.clone(),
                    language: language.clone(),
                };

                if let Err(e) = commands::commit::run(&options, &config).await {
                    match e {
                        // 用户取消不算错误，正常退出
                        GcmtError::UserCancelled => std::process::exit(0),
                        // NoStagedChanges 错误已经在 commit.rs 中输出过了
                        GcmtError::NoStagedChanges => std::process::exit(1),
                        _ => report_error(&e, colored),
                    }
                }
                Ok(())
            }
            Commands::Init { force } => {
                if let Err(e) = commands::init::run(force, colored) {
                    report_error(&e, colored);
                }
                Ok(())
            }
            Commands::Config { action } => {
                if let Err(e) = commands::config::run(action, &config) {
                    report_error(&e, colored);
                }
                Ok(())
            }
            Commands::Hook { action } => {
                match action {
                    HookAction::Install { force } => {
                        if let Err(e) = commands::hook::install(force) {
                            report_error(&e, colored);
                        }
                    }
                    HookAction::Uninstall => {
                        if let Err(e) = commands::hook::uninstall() {
                            report_error(&e, colored);
                        }
                    }
                    HookAction::Run {
                        ref file,
                        ref source,
                        ..
                    } => {
                        // hook 内部自行处理错误，永远不让 git commit 失败
                        commands::hook::run_hook_safe(
                            file,
                            source,
                            &config,
                            cli.provider.as_deref(),
                        )
                        .await;
                    }
                }
                Ok(())
            }
        }
    })
}

/// 输出错误（附带可行的建议）并退出
fn report_error(e: &GcmtError, colored: bool) -> ! {
    ui::error(&e.to_string(), colored);
    if let Some(suggestion) = e.suggestion() {
        println!();
        println!("{}", ui::info(&suggestion, colored));
    }
    std::process::exit(1);
}
