//! Command implementations.
//!
//! # Modules
//! - `commit` - Commit message generation flow.
//! - `hook` - Git hook management (`prepare-commit-msg`).
//! - `init` - Configuration initialization.
//! - `config` - Configuration inspection.
//!
//! # Architecture
//! ```text
//! CLI (cli.rs)
//!   ├── commands/commit.rs  — interactive generation flow
//!   ├── commands/hook.rs    — non-interactive hook flow
//!   ├── commands/init.rs
//!   └── commands/config.rs
//! ```

/// Commit generation command flow.
pub mod commit;
/// Configuration inspection commands.
pub mod config;
/// Git hook install/uninstall/run command.
pub mod hook;
/// Configuration initialization command.
pub mod init;

/// `commit` 命令参数
#[derive(Debug, Clone, Default)]
pub struct CommitOptions {
    /// 跳过所有确认，生成后直接提交
    pub yes: bool,
    /// 只生成并打印 commit message，不提交
    pub dry_run: bool,
    /// 覆盖配置中的 provider
    pub provider: Option<String>,
    /// 覆盖配置中的 style label
    pub style: Option<String>,
    /// 覆盖配置中的语言
    pub language: Option<String>,
}
