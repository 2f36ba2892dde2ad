//! Bring worktrees up to date with their upstream branches.
//!
//! Each worktree goes through detect, stash, pull, optional rebase and
//! restore, in that order. Once changes are stashed, the restore step runs
//! whatever happened in between, and a stash that cannot be popped is left
//! in place for the user.

use super::{Worktree, WorktreeManager};
use crate::core::ProgressSink;
use crate::error::{Result, WtError};
use crate::git::{PullOutcome, RebaseOutcome};

const STASH_MESSAGE: &str = "wt sync";
const FALLBACK_BASE: &str = "origin/main";

/// Outcome of syncing one worktree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncResult {
    pub success: bool,
    /// Changes were stashed before pulling.
    pub stashed: bool,
    /// One line per completed step.
    pub message: String,
    pub error: Option<String>,
}

impl SyncResult {
    fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    fn push_line(&mut self, line: &str) {
        if !self.message.is_empty() {
            self.message.push('\n');
        }
        self.message.push_str(line);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSuccess {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    pub name: String,
    pub error: String,
    /// Changes were stashed; they may still be in the stash.
    pub stashed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub succeeded: Vec<SyncSuccess>,
    pub failed: Vec<SyncFailure>,
}

impl SyncReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The part of a git failure worth showing on one line.
///
/// Merges and rebases print `CONFLICT` lines on stdout, and with `--quiet`
/// stderr may be empty, so a conflict line wins over everything else.
fn git_detail(err: &WtError) -> String {
    fn first_line(text: &str, wanted: fn(&str) -> bool) -> Option<&str> {
        text.lines().map(str::trim).find(|line| wanted(line))
    }

    match err {
        WtError::Git { stderr, stdout, .. } => {
            first_line(stdout, |line| line.starts_with("CONFLICT"))
                .or_else(|| first_line(stderr, |line| !line.is_empty()))
                .or_else(|| first_line(stdout, |line| !line.is_empty()))
                .unwrap_or("unknown error")
                .to_string()
        }
        other => other.to_string(),
    }
}

impl WorktreeManager {
    /// Pull `worktree`'s upstream into it and, with `rebase`, rebase it onto
    /// the configured default base.
    ///
    /// Failures are reported in the returned [`SyncResult`], never as `Err`,
    /// so batch callers can carry on.
    pub fn sync_worktree(
        &self,
        worktree: &Worktree,
        rebase: bool,
        progress: &mut dyn ProgressSink,
    ) -> SyncResult {
        let name = &worktree.name;
        let Some(branch) = worktree.branch.as_deref() else {
            return SyncResult::failed("detached HEAD, skipping");
        };

        let upstream = match self.git.upstream_branch(branch, &self.repo_root) {
            Ok(Some(upstream)) => upstream,
            Ok(None) => return SyncResult::failed("no upstream branch"),
            Err(e) => return SyncResult::failed(format!("no upstream branch: {}", git_detail(&e))),
        };
        let Some((remote, remote_branch)) = upstream.split_once('/') else {
            return SyncResult::failed(format!("invalid upstream: {upstream}"));
        };

        let mut result = SyncResult::default();
        match self.git.has_uncommitted_changes(&worktree.path) {
            Ok(false) => {}
            Ok(true) => {
                progress.on_step(&format!("[{name}] Stashing uncommitted changes..."));
                if self
                    .git
                    .stash_push_with_untracked(STASH_MESSAGE, &worktree.path)
                    .is_err()
                {
                    return SyncResult::failed("failed to stash changes");
                }
                result.stashed = true;
            }
            Err(_) => return SyncResult::failed("failed to stash changes"),
        }

        self.pull_and_rebase(worktree, remote, remote_branch, rebase, &mut result, progress);

        if result.stashed {
            progress.on_step(&format!("[{name}] Restoring uncommitted changes..."));
            match self.git.stash_pop(&worktree.path) {
                Ok(()) => result.push_line("✓ Stash applied"),
                Err(_) => {
                    progress.on_warning(&format!(
                        "[{name}] Failed to apply stash, preserved in stash@{{0}}"
                    ));
                    if result.success {
                        result.success = false;
                        result.error = Some("stash conflict".to_string());
                    }
                }
            }
        }

        result
    }

    fn pull_and_rebase(
        &self,
        worktree: &Worktree,
        remote: &str,
        remote_branch: &str,
        rebase: bool,
        result: &mut SyncResult,
        progress: &mut dyn ProgressSink,
    ) {
        let name = &worktree.name;
        progress.on_step(&format!("[{name}] Pulling from {remote}/{remote_branch}..."));
        match self.git.pull(remote, remote_branch, &worktree.path) {
            Ok(PullOutcome::UpToDate) => result.push_line("✓ Already up to date"),
            Ok(PullOutcome::FastForward { commits }) => {
                result.push_line(&format!("✓ Fast-forward: {commits} commits"))
            }
            Ok(PullOutcome::Merge) => result.push_line("✓ Merged: 1 commit"),
            Err(e) => {
                result.error = Some(format!("pull failed: {}", git_detail(&e)));
                if let Ok(true) = self.git.merge_abort(&worktree.path) {
                    progress.on_debug(&format!("[{name}] Aborted conflicting merge"));
                }
                return;
            }
        }

        if rebase {
            let base = match self.config.default_base() {
                "" => FALLBACK_BASE,
                base => base,
            };
            progress.on_step(&format!("[{name}] Rebasing onto {base}..."));
            match self.git.rebase(base, &worktree.path) {
                Ok(RebaseOutcome::UpToDate) => {
                    result.push_line(&format!("✓ Already based on {base}"))
                }
                Ok(RebaseOutcome::Rebased) => {
                    let range = format!("{base}..HEAD");
                    match self.git.rev_list_count(&range, &worktree.path) {
                        Ok(ahead) => result.push_line(&format!("✓ Rebased, {ahead} commits ahead")),
                        Err(_) => result.push_line("✓ Rebased"),
                    }
                }
                Err(e) => {
                    result.error = Some(format!("rebase failed: {}", git_detail(&e)));
                    if let Err(abort_err) = self.git.rebase_abort(&worktree.path) {
                        progress.on_warning(&format!(
                            "[{name}] Could not abort rebase: {}",
                            git_detail(&abort_err)
                        ));
                    }
                    return;
                }
            }
        }

        result.success = true;
    }

    /// Sync the worktrees named in `names`, or the current worktree when
    /// `names` is empty.
    ///
    /// Unknown names are warned about and skipped. Every target is synced
    /// even when earlier ones fail.
    pub fn sync_many(
        &self,
        names: &[String],
        rebase: bool,
        progress: &mut dyn ProgressSink,
    ) -> Result<SyncReport> {
        let targets = if names.is_empty() {
            let current = self.current()?.ok_or_else(|| WtError::NotFound {
                name: self.cwd.display().to_string(),
            })?;
            vec![current]
        } else {
            let worktrees = self.list()?;
            let mut targets: Vec<Worktree> = Vec::new();
            for name in names {
                match self.find_in(&worktrees, name) {
                    Some(worktree) if !targets.iter().any(|t| t.path == worktree.path) => {
                        targets.push(worktree.clone())
                    }
                    Some(_) => {}
                    None => progress.on_warning(&format!("Worktree '{name}' not found, skipping")),
                }
            }
            targets
        };

        if targets.is_empty() {
            return Err(WtError::NotFound {
                name: names.join(", "),
            });
        }

        Ok(self.sync_each(&targets, rebase, progress))
    }

    /// Sync every worktree of the repository.
    ///
    /// Works on the listed records, so worktrees that share a derived name
    /// are each synced once.
    pub fn sync_all(&self, rebase: bool, progress: &mut dyn ProgressSink) -> Result<SyncReport> {
        let worktrees = self.list()?;
        Ok(self.sync_each(&worktrees, rebase, progress))
    }

    fn sync_each(
        &self,
        targets: &[Worktree],
        rebase: bool,
        progress: &mut dyn ProgressSink,
    ) -> SyncReport {
        let mut report = SyncReport::default();
        for worktree in targets {
            let result = self.sync_worktree(worktree, rebase, progress);
            if result.success {
                report.succeeded.push(SyncSuccess {
                    name: worktree.name.clone(),
                    message: result.message,
                });
            } else {
                report.failed.push(SyncFailure {
                    name: worktree.name.clone(),
                    error: result.error.unwrap_or_else(|| "unknown error".to_string()),
                    stashed: result.stashed,
                });
            }
        }

        report
    }
}
