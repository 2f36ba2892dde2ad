//! Worktree deletion.

use super::{Worktree, WorktreeManager};
use crate::core::{ProgressSink, Prompter};
use crate::error::{Result, WtError};

impl WorktreeManager {
    /// Remove the worktree `name` and, unless `keep_branch`, its branch.
    ///
    /// Returns `Ok(false)` when the user declines to discard unpushed
    /// commits. Without `force`, uncommitted changes are an error.
    pub fn delete(
        &self,
        name: &str,
        force: bool,
        keep_branch: bool,
        sink: &mut (impl ProgressSink + Prompter),
    ) -> Result<bool> {
        let worktree = self
            .find_by_name(name)?
            .ok_or_else(|| WtError::NotFound {
                name: name.to_string(),
            })?;
        self.delete_worktree(&worktree, force, keep_branch, sink)
    }

    /// Remove exactly `worktree`, without resolving its name again.
    ///
    /// Several worktrees can share a derived name, so callers that already
    /// hold the record use this instead of [`Self::delete`].
    pub fn delete_worktree(
        &self,
        worktree: &Worktree,
        force: bool,
        keep_branch: bool,
        sink: &mut (impl ProgressSink + Prompter),
    ) -> Result<bool> {
        let name = worktree.name.as_str();
        if self.is_current(worktree)? {
            return Err(WtError::CannotDeleteCurrent);
        }

        if !force {
            let status = self.git.status_porcelain(&worktree.path)?;
            if !status.trim().is_empty() {
                return Err(WtError::UncommittedChanges {
                    name: name.to_string(),
                    status: status.trim_end().to_string(),
                });
            }

            if let Some(branch) = &worktree.branch {
                if !self.confirm_unpushed(name, branch, sink)? {
                    return Ok(false);
                }
            }
        }

        sink.on_step(&format!("Removing worktree {}", worktree.path.display()));
        self.git
            .worktree_remove(&worktree.path, force, &self.repo_root)?;

        if let Some(branch) = worktree.branch.as_deref().filter(|_| !keep_branch) {
            sink.on_step(&format!("Deleting branch '{branch}'"));
            if let Err(e) = self.git.branch_delete(branch, force, &self.repo_root) {
                sink.on_warning(&format!("Worktree removed but failed to delete branch: {e}"));
            }
        }

        self.git.worktree_prune(&self.repo_root)?;
        Ok(true)
    }

    /// Ask before deleting a branch with commits its upstream lacks.
    /// `true` means go ahead.
    fn confirm_unpushed(
        &self,
        name: &str,
        branch: &str,
        sink: &mut (impl ProgressSink + Prompter),
    ) -> Result<bool> {
        let Some(upstream) = self.git.upstream_branch(branch, &self.repo_root)? else {
            return Ok(true);
        };
        let Some((ahead, _)) = self.ahead_behind(branch, &upstream) else {
            sink.on_debug(&format!("Could not compare '{branch}' with {upstream}"));
            return Ok(true);
        };
        if ahead == 0 {
            return Ok(true);
        }

        let commits = self
            .git
            .log_oneline(&format!("{upstream}..{branch}"), &self.repo_root)
            .unwrap_or_default();
        Ok(sink.confirm(
            &format!(
                "Worktree '{name}' has {ahead} unpushed commit(s):\n{commits}\n\nDelete anyway?"
            ),
            false,
        ))
    }
}
