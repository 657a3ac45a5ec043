//! # gcmt-rs
//!
//! AI 驱动的 commit message 生成器。
//!
//! 读取仓库的 staged changes，发送给远程 LLM provider，生成符合
//! Conventional Commits 规范的 commit message 供用户确认、编辑后提交。
//!
//! ## 功能
//! - **Commit message 生成**：基于 staged diff 自动生成，支持三档风格
//!   （concise / normal / detailed）与任意目标语言
//! - **多 Provider 支持**：OpenAI, Gemini, Anthropic, DeepSeek
//! - **费用确认**：大 diff 在高成本 provider 上触发切换提示
//! - **Git hook 集成**：`prepare-commit-msg` hook 自动填充提交信息
//!
//! ## 快速开始
//!
//! ### 作为 CLI 使用
//! ```bash
//! # 安装
//! cargo install gcmt-rs
//!
//! # 初始化配置
//! gcmt-rs init
//!
//! # 生成 commit message
//! git add .
//! gcmt-rs commit
//! ```
//!
//! ### 作为库使用
//! ```ignore
//! use gcmt_rs::config::{AppConfig, ProviderKind};
//! use gcmt_rs::git::{self, GitOperations, repository::GitRepository};
//! use gcmt_rs::llm::prompt::CommitStyle;
//! use gcmt_rs::llm::provider::create_provider;
//!
//! # async fn example() -> anyhow::Result<()> {
//! // 1. 读取 staged 变更
//! let repo = GitRepository::open(None)?;
//! let diff = git::staged_payload(&repo)?;
//!
//! // 2. 创建 provider 并生成
//! let config = AppConfig::default();
//! let provider = create_provider(ProviderKind::OpenAI, &config)?;
//! let message = provider
//!     .generate_commit_message(&diff, CommitStyle::Normal, "English", None)
//!     .await?;
//! println!("Generated: {}", message);
//! # Ok(())
//! # }
//! ```
//!
//! ## 核心模块
//! - [`git`] - Git 操作抽象
//! - [`llm`] - LLM provider 接口和实现
//! - [`commands`] - CLI 命令实现
//! - [`config`] - 配置管理
//! - [`error`] - 统一错误类型
//! - [`ui`] - 用户界面工具
//!
//! ## 配置
//! 配置文件位置：
//! - Linux: `~/.config/gcmt/config.toml`
//! - macOS: `~/Library/Application Support/gcmt/config.toml`
//! - Windows: `%APPDATA%\gcmt\config\config.toml`
//!
//! 示例配置：
//! ```toml
//! [commit]
//! provider = "openai"
//! style = "Normal - Up to 500 characters"
//! language = "English"
//!
//! [providers.openai]
//! api_key = "sk-..."
//! model = "gpt-4o"
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod git;
pub mod llm;
pub mod ui;
