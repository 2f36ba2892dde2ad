//! Worktree creation.

use super::WorktreeManager;
use crate::config::defaults;
use crate::core::ProgressSink;
use crate::error::{Result, WtError};
use std::path::{Path, PathBuf};

impl WorktreeManager {
    /// Create a worktree for `name` and return its path.
    ///
    /// A new branch `branch_name(name)` is created unless it already exists
    /// locally, in which case the existing branch is checked out. Detached
    /// worktrees start at `base`, defaulting to the current HEAD, and remember
    /// `name` so later listings can show it.
    ///
    /// Push wiring after the worktree exists is best effort: failures are
    /// reported as warnings and the worktree is kept.
    pub fn create(
        &self,
        name: &str,
        base: Option<&str>,
        detached: bool,
        progress: &mut dyn ProgressSink,
    ) -> Result<PathBuf> {
        let branch = self.config.branch_name(name);
        let worktrees = self.list()?;

        let clash = worktrees.iter().find(|w| {
            w.branch.as_deref() == Some(branch.as_str()) || (detached && w.name == name)
        });
        if let Some(existing) = clash {
            return Err(WtError::AlreadyExists {
                name: name.to_string(),
                path: existing.path.clone(),
            });
        }

        let path = self.config.resolve_worktree_path(name, &branch)?;
        if path.exists() {
            return Err(WtError::PathExists { path });
        }

        if detached {
            let base = base.unwrap_or("HEAD");
            progress.on_step(&format!("Creating detached worktree at {}", path.display()));
            self.git
                .worktree_add(&path, &branch, false, Some(base), true, &self.cwd)?;

            if let Err(e) = self.store_name(&path, name) {
                progress.on_warning(&format!("Could not record name for '{name}': {e}"));
            }
            return Ok(path);
        }

        let create_branch = !self.git.branch_exists(&branch, &self.repo_root)?;
        let base = base.unwrap_or(self.config.default_base());
        if create_branch {
            progress.on_step(&format!("Creating branch '{branch}' from {base}"));
        } else {
            progress.on_step(&format!("Using existing branch '{branch}'"));
        }
        self.git.worktree_add(
            &path,
            &branch,
            create_branch,
            create_branch.then_some(base),
            false,
            &self.cwd,
        )?;

        if let Err(e) = self.wire_push_remote(&branch, create_branch, &path, progress) {
            progress.on_warning(&format!(
                "Worktree created, but push tracking for '{branch}' was not configured: {e}"
            ));
        }

        Ok(path)
    }

    /// Point `branch` at its remote counterpart: track it when it exists,
    /// otherwise pre-configure the push target so `git push` needs no `-u`.
    fn wire_push_remote(
        &self,
        branch: &str,
        created: bool,
        worktree_path: &Path,
        progress: &mut dyn ProgressSink,
    ) -> Result<()> {
        let remote = defaults::REMOTE;
        if !created && self.git.remote_branch_exists(branch, remote, &self.repo_root)? {
            progress.on_debug(&format!("Tracking {remote}/{branch}"));
            return self.git.set_upstream(branch, remote, branch, &self.repo_root);
        }

        progress.on_debug(&format!("Configuring push target {remote}/{branch}"));
        self.git
            .configure_push_remote(branch, remote, branch, worktree_path)
    }
}
