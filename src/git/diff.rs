use crate::error::{GcmtError, Result};
use crate::git::GitOperations;

/// Staged changes 的文件级统计
///
/// 从 name-status 列表统计各类变更数量。
///
/// # 字段
/// - `added`: 新增文件数（`A`）
/// - `modified`: 修改文件数（`M`）
/// - `deleted`: 删除文件数（`D`）
/// - `total`: 变更文件总数（包括重命名等其他状态）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSummary {
    pub added: usize,
    pub modified: usize,
    pub deleted: usize,
    pub total: usize,
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} files changed ({} added, {} modified, {} deleted)",
            self.total, self.added, self.modified, self.deleted
        )
    }
}

/// 获取发送给 LLM 的 staged 变更内容
///
/// 优先返回完整的 unified diff；diff 为空时（如仅权限变更）退回
/// name-status 列表；两者都为空则报 [`GcmtError::NoStagedChanges`]。
pub fn staged_payload(repo: &dyn GitOperations) -> Result<String> {
    let diff = repo.get_staged_diff()?;
    if !diff.trim().is_empty() {
        return Ok(diff);
    }

    let listing = repo.get_staged_name_status()?;
    if listing.trim().is_empty() {
        return Err(GcmtError::NoStagedChanges);
    }

    Ok(listing)
}

/// 获取 staged 变更的文件级统计
pub fn staged_summary(repo: &dyn GitOperations) -> Result<ChangeSummary> {
    let listing = repo.get_staged_name_status()?;
    Ok(summarize_name_status(&listing))
}

/// 从 name-status 列表统计各类变更数量
///
/// 每行以状态字母开头（`A`/`M`/`D`/`R`/...），与文件路径以制表符分隔。
pub fn summarize_name_status(listing: &str) -> ChangeSummary {
    let lines: Vec<&str> = listing.lines().filter(|l| !l.trim().is_empty()).collect();

    let added = lines.iter().filter(|l| l.starts_with('A')).count();
    let modified = lines.iter().filter(|l| l.starts_with('M')).count();
    let deleted = lines.iter().filter(|l| l.starts_with('D')).count();

    ChangeSummary {
        added,
        modified,
        deleted,
        total: lines.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockGitOperations;
    use pretty_assertions::assert_eq;

    // === summarize_name_status 测试 ===

    #[test]
    fn test_summarize_name_status_mixed() {
        let listing = "A\tsrc/new.rs\nM\tsrc/main.rs\nM\tREADME.md\nD\told.txt\n";
        let summary = summarize_name_status(listing);
        assert_eq!(summary.added, 1);
        assert_eq!(summary.modified, 2);
        assert_eq!(summary.deleted, 1);
        assert_eq!(summary.total, 4);
    }

    #[test]
    fn test_summarize_name_status_empty() {
        let summary = summarize_name_status("");
        assert_eq!(summary.total, 0);
        assert_eq!(summary.added, 0);
    }

    #[test]
    fn test_summarize_name_status_rename_counts_in_total_only() {
        // rename 不属于 A/M/D，但计入总数
        let listing = "R100\tsrc/old.rs\tsrc/new.rs\nM\tsrc/lib.rs\n";
        let summary = summarize_name_status(listing);
        assert_eq!(summary.added, 0);
        assert_eq!(summary.modified, 1);
        assert_eq!(summary.deleted, 0);
        assert_eq!(summary.total, 2);
    }

    #[test]
    fn test_change_summary_display() {
        let summary = ChangeSummary {
            added: 1,
            modified: 2,
            deleted: 0,
            total: 3,
        };
        assert_eq!(
            summary.to_string(),
            "3 files changed (1 added, 2 modified, 0 deleted)"
        );
    }

    // === staged_payload 级联测试 ===

    #[test]
    fn test_staged_payload_prefers_diff() {
        let mut repo = MockGitOperations::new();
        repo.expect_get_staged_diff()
            .returning(|| Ok("diff --git a/x b/x\n+hello\n".to_string()));

        let payload = staged_payload(&repo).unwrap();
        assert_eq!(payload, "diff --git a/x b/x\n+hello\n");
    }

    #[test]
    fn test_staged_payload_falls_back_to_name_status() {
        let mut repo = MockGitOperations::new();
        repo.expect_get_staged_diff().returning(|| Ok(String::new()));
        repo.expect_get_staged_name_status()
            .returning(|| Ok("M\tsrc/main.rs\n".to_string()));

        let payload = staged_payload(&repo).unwrap();
        assert_eq!(payload, "M\tsrc/main.rs\n");
    }

    #[test]
    fn test_staged_payload_whitespace_only_diff_falls_back() {
        let mut repo = MockGitOperations::new();
        repo.expect_get_staged_diff()
            .returning(|| Ok("\n  \n".to_string()));
        repo.expect_get_staged_name_status()
            .returning(|| Ok("A\tnew.rs\n".to_string()));

        let payload = staged_payload(&repo).unwrap();
        assert_eq!(payload, "A\tnew.rs\n");
    }

    #[test]
    fn test_staged_payload_fails_when_both_empty() {
        let mut repo = MockGitOperations::new();
        repo.expect_get_staged_diff().returning(|| Ok(String::new()));
        repo.expect_get_staged_name_status()
            .returning(|| Ok(String::new()));

        let err = staged_payload(&repo).unwrap_err();
        assert!(matches!(err, GcmtError::NoStagedChanges));
    }

    #[test]
    fn test_staged_payload_propagates_git_failure() {
        let mut repo = MockGitOperations::new();
        repo.expect_get_staged_diff()
            .returning(|| Err(GcmtError::GitCommand("index locked".to_string())));

        let err = staged_payload(&repo).unwrap_err();
        assert!(matches!(err, GcmtError::GitCommand(_)));
    }
}
