use super::GitCommand;
use crate::error::Result;
use std::path::Path;

impl GitCommand {
    /// `git status --porcelain` output for a worktree.
    pub fn status_porcelain(&self, worktree_path: &Path) -> Result<String> {
        Ok(self
            .run(&["status", "--porcelain"], worktree_path, true)?
            .stdout)
    }

    /// Check if a worktree has uncommitted or untracked changes.
    pub fn has_uncommitted_changes(&self, worktree_path: &Path) -> Result<bool> {
        Ok(!self.status_porcelain(worktree_path)?.trim().is_empty())
    }

    /// Stash all changes including untracked files.
    pub fn stash_push_with_untracked(&self, message: &str, worktree_path: &Path) -> Result<()> {
        let mut args = vec!["stash", "push", "-u", "-m", message];
        if self.quiet {
            args.push("--quiet");
        }

        self.run(&args, worktree_path, true)?;
        Ok(())
    }

    /// Pop the most recent stash. On conflict git keeps the entry.
    pub fn stash_pop(&self, worktree_path: &Path) -> Result<()> {
        let mut args = vec!["stash", "pop"];
        if self.quiet {
            args.push("--quiet");
        }

        self.run(&args, worktree_path, true)?;
        Ok(())
    }

    /// Number of entries in the stash.
    pub fn stash_count(&self, worktree_path: &Path) -> Result<usize> {
        let output = self.run(&["stash", "list"], worktree_path, true)?;
        Ok(output.stdout.lines().filter(|l| !l.trim().is_empty()).count())
    }
}
