use super::GitCommand;
use crate::error::Result;
use std::path::Path;

/// What a successful `git pull` did to the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullOutcome {
    UpToDate,
    FastForward { commits: u32 },
    Merge,
}

/// What a successful `git rebase` did to the branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebaseOutcome {
    UpToDate,
    Rebased,
}

fn says_up_to_date(text: &str) -> bool {
    text.contains("Already up to date") || text.contains("Already up-to-date")
}

/// Classify a finished pull from git's output and how HEAD moved.
pub(crate) fn classify_pull(
    output: &str,
    head_moved: bool,
    head_is_merge: bool,
    commits: u32,
) -> PullOutcome {
    if !head_moved || says_up_to_date(output) {
        PullOutcome::UpToDate
    } else if head_is_merge {
        PullOutcome::Merge
    } else {
        PullOutcome::FastForward { commits }
    }
}

impl GitCommand {
    /// Pull `remote/branch` into the branch checked out in `worktree_path`.
    ///
    /// Merges (never rebases) when the histories diverged.
    pub fn pull(&self, remote: &str, branch: &str, worktree_path: &Path) -> Result<PullOutcome> {
        let before = self.rev_parse("HEAD", worktree_path)?;

        let mut args = vec!["pull", "--no-rebase", "--no-edit"];
        if self.quiet {
            args.push("--quiet");
        }
        args.extend([remote, branch]);
        let output = self.run(&args, worktree_path, true)?;

        let after = self.rev_parse("HEAD", worktree_path)?;
        let head_moved = before != after;
        let head_is_merge = head_moved && self.is_merge_commit("HEAD", worktree_path)?;
        let commits = if head_moved {
            self.rev_list_count(&format!("{before}..{after}"), worktree_path)?
        } else {
            0
        };

        Ok(classify_pull(
            &format!("{}{}", output.stdout, output.stderr),
            head_moved,
            head_is_merge,
            commits,
        ))
    }

    /// Rebase the branch checked out in `worktree_path` onto `onto`.
    pub fn rebase(&self, onto: &str, worktree_path: &Path) -> Result<RebaseOutcome> {
        let before = self.rev_parse("HEAD", worktree_path)?;
        let output = self.run(&["rebase", onto], worktree_path, true)?;
        let after = self.rev_parse("HEAD", worktree_path)?;

        let text = format!("{}{}", output.stdout, output.stderr);
        if before == after || text.contains("is up to date") {
            Ok(RebaseOutcome::UpToDate)
        } else {
            Ok(RebaseOutcome::Rebased)
        }
    }

    /// Abort a merge left behind by a conflicting pull. `false` when there
    /// was no merge in progress.
    pub fn merge_abort(&self, worktree_path: &Path) -> Result<bool> {
        Ok(self
            .run(&["merge", "--abort"], worktree_path, false)?
            .success())
    }

    pub fn rebase_abort(&self, worktree_path: &Path) -> Result<()> {
        self.run(&["rebase", "--abort"], worktree_path, true)?;
        Ok(())
    }
}
