//! Cleanup of worktrees whose branches are merged or whose remote branch
//! was deleted.

use super::{Worktree, WorktreeManager};
use crate::core::{ProgressSink, Prompter};
use crate::error::Result;
use std::fmt;

/// Why a worktree qualifies for cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanReason {
    /// The branch is an ancestor of `origin/<default branch>`.
    Merged { into: String },
    /// The branch has a configured upstream whose remote branch no longer
    /// exists.
    RemoteDeleted { upstream: String },
}

impl fmt::Display for CleanReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanReason::Merged { into } => write!(f, "merged into {into}"),
            CleanReason::RemoteDeleted { .. } => write!(f, "remote branch deleted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanCandidate {
    pub worktree: Worktree,
    pub reason: CleanReason,
}

impl WorktreeManager {
    /// Worktrees that [`Self::clean_merged`] would remove.
    ///
    /// Only prefixed branches are considered (a worktree whose name equals
    /// its branch was not created under the configured prefix), and never
    /// the default branch.
    pub fn clean_candidates(&self) -> Result<Vec<CleanCandidate>> {
        let default_branch = self.default_branch()?;
        let merge_target = format!("origin/{default_branch}");
        let mut candidates = Vec::new();

        for worktree in self.list()? {
            let Some(branch) = worktree.branch.clone() else {
                continue;
            };
            if branch == default_branch || worktree.name == branch {
                continue;
            }

            let reason = if self
                .git
                .is_ancestor(&branch, &merge_target, &self.repo_root)?
            {
                Some(CleanReason::Merged {
                    into: default_branch.clone(),
                })
            } else {
                self.remote_deleted(&branch)?
                    .map(|upstream| CleanReason::RemoteDeleted { upstream })
            };

            if let Some(reason) = reason {
                candidates.push(CleanCandidate { worktree, reason });
            }
        }

        Ok(candidates)
    }

    /// Upstream of `branch` when that remote branch is gone.
    ///
    /// The configured upstream is read from the branch config, which
    /// survives the remote-tracking ref being pruned.
    fn remote_deleted(&self, branch: &str) -> Result<Option<String>> {
        let Some(upstream) = self.git.configured_upstream(branch, &self.repo_root)? else {
            return Ok(None);
        };
        let Some((remote, remote_branch)) = upstream.split_once('/') else {
            return Ok(None);
        };
        if self
            .git
            .remote_branch_exists(remote_branch, remote, &self.repo_root)?
        {
            return Ok(None);
        }
        Ok(Some(upstream))
    }

    /// Remove merged and orphaned worktrees together with their branches.
    ///
    /// `dry_run` returns the candidate names without touching anything.
    /// Otherwise, unless `force`, the whole batch is confirmed once; a
    /// decline returns an empty list. One failed removal does not stop
    /// the others.
    pub fn clean_merged(
        &self,
        dry_run: bool,
        force: bool,
        sink: &mut (impl ProgressSink + Prompter),
    ) -> Result<Vec<String>> {
        let candidates = self.clean_candidates()?;
        if dry_run || candidates.is_empty() {
            return Ok(candidates.into_iter().map(|c| c.worktree.name).collect());
        }

        if !force {
            let listing: Vec<String> = candidates
                .iter()
                .map(|c| format!("  {:20} ({})", c.worktree.name, c.reason))
                .collect();
            let message = format!(
                "The following worktrees will be removed:\n{}\n\nProceed?",
                listing.join("\n")
            );
            if !sink.confirm(&message, false) {
                return Ok(Vec::new());
            }
        }

        let mut removed = Vec::new();
        for candidate in candidates {
            let name = candidate.worktree.name.clone();
            match self.delete_worktree(&candidate.worktree, true, false, sink) {
                Ok(true) => {
                    sink.on_step(&format!("Removed {name} ({})", candidate.reason));
                    removed.push(name);
                }
                Ok(false) => {}
                Err(e) => sink.on_warning(&format!("Failed to remove {name}: {e}")),
            }
        }

        Ok(removed)
    }
}
