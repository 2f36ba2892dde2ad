use super::GitCommand;
use crate::error::Result;
use std::path::{Path, PathBuf};

impl GitCommand {
    pub fn is_inside_git_repo(&self, cwd: &Path) -> Result<bool> {
        Ok(self.run(&["rev-parse", "--git-dir"], cwd, false)?.success())
    }

    /// The git directory shared by all worktrees, as an absolute path.
    pub fn git_common_dir(&self, cwd: &Path) -> Result<PathBuf> {
        let dir = PathBuf::from(self.output_of(&["rev-parse", "--git-common-dir"], cwd)?);
        if dir.is_absolute() {
            Ok(dir)
        } else {
            Ok(cwd.join(dir))
        }
    }

    pub fn rev_parse(&self, rev: &str, cwd: &Path) -> Result<String> {
        self.output_of(&["rev-parse", rev], cwd)
    }

    /// Subject line of the commit `rev` points at.
    pub fn commit_subject(&self, rev: &str, cwd: &Path) -> Result<String> {
        self.output_of(&["log", "-1", "--pretty=%s", rev], cwd)
    }

    /// `true` when `ancestor` is reachable from `descendant`.
    pub fn is_ancestor(&self, ancestor: &str, descendant: &str, cwd: &Path) -> Result<bool> {
        let output = self.run(
            &["merge-base", "--is-ancestor", ancestor, descendant],
            cwd,
            false,
        )?;
        Ok(output.success())
    }

    /// Commits `(ahead, behind)` of `branch` relative to `upstream`.
    pub fn ahead_behind(&self, branch: &str, upstream: &str, cwd: &Path) -> Result<(u32, u32)> {
        let range = format!("{upstream}...{branch}");
        let counts = self.output_of(&["rev-list", "--left-right", "--count", &range], cwd)?;
        let mut parts = counts.split_whitespace();
        let behind = parts.next().and_then(|n| n.parse().ok());
        let ahead = parts.next().and_then(|n| n.parse().ok());
        match (ahead, behind) {
            (Some(ahead), Some(behind)) => Ok((ahead, behind)),
            _ => Err(crate::error::WtError::Git {
                command: format!("rev-list --left-right --count {range}"),
                stderr: format!("unexpected output: {counts}"),
                stdout: counts,
            }),
        }
    }

    /// Number of commits in a revision range such as `a..b`.
    pub fn rev_list_count(&self, range: &str, cwd: &Path) -> Result<u32> {
        let count = self.output_of(&["rev-list", "--count", range], cwd)?;
        Ok(count.parse().unwrap_or(0))
    }

    /// One line per commit in `range`.
    pub fn log_oneline(&self, range: &str, cwd: &Path) -> Result<String> {
        self.output_of(&["log", "--oneline", range], cwd)
    }

    /// `true` when the commit has more than one parent.
    pub fn is_merge_commit(&self, rev: &str, cwd: &Path) -> Result<bool> {
        let second_parent = format!("{rev}^2");
        let output = self.run(&["rev-parse", "--verify", "--quiet", &second_parent], cwd, false)?;
        Ok(output.success())
    }

    /// `git show --name-status` for one commit, without the header.
    pub fn changed_files_in_commit(&self, rev: &str, cwd: &Path) -> Result<String> {
        self.output_of(&["show", "--name-status", "--pretty=format:", rev], cwd)
    }
}
