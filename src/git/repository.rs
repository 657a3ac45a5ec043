use git2::{Delta, DiffOptions, Repository};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{GcmtError, Result};
use crate::git::GitOperations;

pub struct GitRepository {
    repo: Repository,
    workdir: PathBuf,
}

impl GitRepository {
    /// 打开 git 仓库
    ///
    /// # Arguments
    /// * `path` - 仓库路径，None 则从当前目录向上查找
    pub fn open(path: Option<&Path>) -> Result<Self> {
        let repo = match path {
            Some(p) => Repository::discover(p)?,
            None => Repository::discover(".")?,
        };
        let workdir = repo
            .workdir()
            .ok_or_else(|| GcmtError::GitCommand("repository has no working directory".to_string()))?
            .to_path_buf();
        Ok(Self { repo, workdir })
    }

    /// 构建 HEAD tree 与 index 之间的 diff
    fn staged_diff(&self) -> Result<git2::Diff<'_>> {
        let index = self.repo.index()?;
        let mut opts = DiffOptions::new();

        // 空仓库时，对比 empty tree (None) 和 index
        let head_tree = if self.is_unborn()? {
            None
        } else {
            Some(self.repo.head()?.peel_to_tree()?)
        };

        let diff =
            self.repo
                .diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))?;
        Ok(diff)
    }

    /// 将 git2::Diff 转换为 patch 字符串
    fn diff_to_string(&self, diff: &git2::Diff) -> Result<String> {
        let mut output = Vec::new();
        diff.print(git2::DiffFormat::Patch, |_delta, _hunk, line| {
            // 行类型标记（+、-、空格）需要手动写入
            let origin = line.origin();
            match origin {
                '+' | '-' | ' ' => {
                    let _ = output.write_all(&[origin as u8]);
                }
                _ => {}
            }
            let _ = output.write_all(line.content());
            true
        })?;
        Ok(String::from_utf8_lossy(&output).to_string())
    }

    /// 检测 unborn branch（空仓库，无任何提交）
    fn is_unborn(&self) -> Result<bool> {
        match self.repo.head() {
            Ok(_) => Ok(false),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => Ok(true),
            Err(e) => Err(e.into()),
        }
    }
}

/// Delta 状态到 name-status 字母的映射（与 `git diff --name-status` 一致）
fn status_letter(delta: Delta) -> char {
    match delta {
        Delta::Added => 'A',
        Delta::Deleted => 'D',
        Delta::Modified => 'M',
        Delta::Renamed => 'R',
        Delta::Copied => 'C',
        Delta::Typechange => 'T',
        _ => 'X',
    }
}

impl GitOperations for GitRepository {
    fn has_staged_changes(&self) -> Result<bool> {
        let diff = self.staged_diff()?;
        Ok(diff.deltas().count() > 0)
    }

    fn get_staged_diff(&self) -> Result<String> {
        let diff = self.staged_diff()?;
        self.diff_to_string(&diff)
    }

    fn get_staged_name_status(&self) -> Result<String> {
        let diff = self.staged_diff()?;
        let mut listing = String::new();

        for delta in diff.deltas() {
            let letter = status_letter(delta.status());
            // 删除的文件只有 old_file 路径
            let path = match delta.status() {
                Delta::Deleted => delta.old_file().path(),
                _ => delta.new_file().path().or_else(|| delta.old_file().path()),
            };

            if let Some(path) = path {
                listing.push(letter);
                listing.push('\t');
                listing.push_str(&path.to_string_lossy());
                listing.push('\n');
            }
        }

        Ok(listing)
    }

    fn commit(&self, message: &str) -> Result<()> {
        crate::git::commit::commit_changes(&self.workdir, message)
    }
}
