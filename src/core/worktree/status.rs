//! Per-worktree status: local changes and divergence from upstream.

use super::{Worktree, WorktreeManager};
use crate::error::Result;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorktreeStatus {
    /// Number of entries in `git status --porcelain`.
    pub uncommitted_count: usize,
    /// The status lines themselves.
    pub uncommitted_files: String,
    pub ahead: u32,
    pub behind: u32,
    /// Upstream in `remote/branch` form, when the branch tracks one.
    pub upstream: Option<String>,
}

impl WorktreeStatus {
    pub fn is_clean(&self) -> bool {
        self.uncommitted_count == 0
    }
}

impl WorktreeManager {
    /// Local changes and upstream divergence for `worktree`.
    ///
    /// Ahead/behind stay at zero when they cannot be computed.
    pub fn status(&self, worktree: &Worktree) -> Result<WorktreeStatus> {
        let porcelain = self.git.status_porcelain(&worktree.path)?;
        let files: Vec<&str> = porcelain
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect();

        let mut status = WorktreeStatus {
            uncommitted_count: files.len(),
            uncommitted_files: files.join("\n"),
            ..WorktreeStatus::default()
        };

        if let Some(branch) = &worktree.branch {
            status.upstream = self.git.upstream_branch(branch, &self.repo_root)?;
            if let Some(upstream) = &status.upstream {
                if let Some((ahead, behind)) = self.ahead_behind(branch, upstream) {
                    status.ahead = ahead;
                    status.behind = behind;
                }
            }
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_clean() {
        let status = WorktreeStatus::default();
        assert!(status.is_clean());
        assert_eq!(status.upstream, None);
        assert_eq!((status.ahead, status.behind), (0, 0));
    }
}
