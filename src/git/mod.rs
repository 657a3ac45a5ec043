pub mod commit;
pub mod diff;
pub mod repository;

use std::path::PathBuf;

use crate::error::Result;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

pub use diff::{ChangeSummary, staged_payload, staged_summary, summarize_name_status};

/// Git 操作的统一接口
///
/// 该 trait 抽象了 commit 生成流程需要的所有仓库操作，便于测试和扩展。
/// 主要实现：[`GitRepository`](repository::GitRepository)
///
/// # 设计理念
/// - 纯 Rust 接口，不依赖具体实现
/// - 支持 mock 测试（通过 `mockall`）
/// - 错误处理统一使用 [`GcmtError`](crate::error::GcmtError)
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait GitOperations {
    /// 检查是否有 staged changes
    ///
    /// 快速检查是否有文件被 `git add` 到暂存区。
    fn has_staged_changes(&self) -> Result<bool>;

    /// 获取 staged changes 的 diff
    ///
    /// 等价于 `git diff --staged`。
    ///
    /// # 返回
    /// - `Ok(diff)` - diff 内容（可能为空字符串）
    /// - `Err(_)` - Git 操作失败
    fn get_staged_diff(&self) -> Result<String>;

    /// 获取 staged changes 的 name-status 列表
    ///
    /// 等价于 `git diff --staged --name-status`，每行形如 `M\tsrc/main.rs`。
    ///
    /// # 返回
    /// - `Ok(listing)` - 状态列表（可能为空字符串）
    /// - `Err(_)` - Git 操作失败
    fn get_staged_name_status(&self) -> Result<String>;

    /// 执行 git commit
    ///
    /// 将 staged changes 提交到仓库。调用前需要确保有 staged changes。
    ///
    /// # 注意
    /// - 会触发 pre-commit 和 commit-msg hooks
    /// - 使用 git config 中配置的用户名和邮箱
    fn commit(&self, message: &str) -> Result<()>;
}

/// 从当前工作目录向上查找 git 仓库根目录
///
/// 等价于 `git rev-parse --show-toplevel`。
/// 检查每一级目录是否存在 `.git`（目录或文件，兼容 submodule/worktree）。
pub fn find_git_root() -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    loop {
        if dir.join(".git").exists() {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}
