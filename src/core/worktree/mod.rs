//! The worktree directory.
//!
//! [`WorktreeManager`] rebuilds its view of the repository's worktrees from
//! `git worktree list` on every call; nothing is cached between calls. Each
//! submodule adds one family of operations (creation, deletion, status,
//! cleanup, sync) as further `impl WorktreeManager` blocks.

pub mod clean;
pub mod create;
pub mod delete;
pub mod previous;
pub mod status;
pub mod sync;

pub use clean::{CleanCandidate, CleanReason};
pub use status::WorktreeStatus;
pub use sync::{SyncFailure, SyncReport, SyncResult, SyncSuccess};

use crate::config::{defaults, Config};
use crate::core::repo;
use crate::error::{Result, WtError};
use crate::git::{GitCommand, PorcelainWorktree};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File inside a worktree's private git dir holding the name a detached
/// worktree was created with.
const STORED_NAME_FILE: &str = "wt-name";

const SHORT_COMMIT_LEN: usize = 7;

/// One working directory bound to the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worktree {
    /// Display identity: the prefix-stripped branch, or for detached
    /// worktrees the stored name, the name inferred from the path pattern,
    /// or `(detached-<commit>)`.
    pub name: String,
    pub path: PathBuf,
    /// Checked-out branch; `None` when detached.
    pub branch: Option<String>,
    /// Short commit id of HEAD.
    pub commit: String,
    /// Subject of the HEAD commit, empty when it could not be read.
    pub commit_message: String,
    pub locked: bool,
}

impl Worktree {
    pub fn is_detached(&self) -> bool {
        self.branch.is_none()
    }

    /// Revision to hand to git for this worktree: its branch, else its commit.
    pub fn reference(&self) -> &str {
        self.branch.as_deref().unwrap_or(&self.commit)
    }
}

#[derive(Debug, Clone)]
pub struct WorktreeManager {
    git: GitCommand,
    config: Config,
    repo_root: PathBuf,
    cwd: PathBuf,
}

impl WorktreeManager {
    /// Open the repository containing `cwd`, loading configuration bound to
    /// its main worktree.
    pub fn open(git: GitCommand, cwd: &Path) -> Result<Self> {
        let root = repo::main_worktree_root(&git, cwd)?;
        let config = Config::load(Some(&root))?;
        Ok(Self::new(git, config)?.with_cwd(cwd))
    }

    /// Build a manager from an already loaded configuration. The
    /// configuration must be bound to a repository.
    pub fn new(git: GitCommand, config: Config) -> Result<Self> {
        let repo_root = config
            .repo_root()
            .ok_or(WtError::NoRepoContext)?
            .to_path_buf();
        Ok(Self {
            git,
            config,
            cwd: repo_root.clone(),
            repo_root,
        })
    }

    /// Directory treated as "where the user is" by [`Self::current`].
    pub fn with_cwd(mut self, cwd: &Path) -> Self {
        self.cwd = cwd.to_path_buf();
        self
    }

    pub fn git(&self) -> &GitCommand {
        &self.git
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// All non-bare worktrees, main worktree first.
    pub fn list(&self) -> Result<Vec<Worktree>> {
        let raw = self.git.worktree_list(&self.repo_root)?;
        Ok(raw
            .into_iter()
            .filter(|entry| !entry.bare)
            .map(|entry| self.enrich(entry))
            .collect())
    }

    fn enrich(&self, entry: PorcelainWorktree) -> Worktree {
        let commit: String = entry.head.chars().take(SHORT_COMMIT_LEN).collect();
        let name = match &entry.branch {
            Some(branch) => self.config.worktree_name(branch),
            None => self
                .stored_name(&entry.path)
                .or_else(|| self.config.infer_name_from_path(&entry.path))
                .unwrap_or_else(|| format!("(detached-{commit})")),
        };
        let commit_message = self.commit_message(&entry.head).unwrap_or_default();

        Worktree {
            name,
            path: entry.path,
            branch: entry.branch,
            commit,
            commit_message,
            locked: entry.locked,
        }
    }

    /// The worktree containing the working directory, preferring the most
    /// deeply nested one when worktrees are nested inside each other.
    pub fn current(&self) -> Result<Option<Worktree>> {
        let cwd = canonical(&self.cwd);
        let mut best: Option<(usize, Worktree)> = None;

        for worktree in self.list()? {
            let root = canonical(&worktree.path);
            if !path_contains(&root, &cwd) {
                continue;
            }
            let depth = root.components().count();
            if best.as_ref().is_none_or(|(d, _)| depth > *d) {
                best = Some((depth, worktree));
            }
        }

        Ok(best.map(|(_, worktree)| worktree))
    }

    /// Look up a worktree by name: derived name, then raw branch, then the
    /// prefix-qualified branch for `name`.
    pub fn find_by_name(&self, name: &str) -> Result<Option<Worktree>> {
        let worktrees = self.list()?;
        Ok(self.find_in(&worktrees, name).cloned())
    }

    fn find_in<'a>(&self, worktrees: &'a [Worktree], name: &str) -> Option<&'a Worktree> {
        let qualified = self.config.branch_name(name);
        worktrees
            .iter()
            .find(|w| w.name == name)
            .or_else(|| worktrees.iter().find(|w| w.branch.as_deref() == Some(name)))
            .or_else(|| {
                worktrees
                    .iter()
                    .find(|w| w.branch.as_deref() == Some(qualified.as_str()))
            })
    }

    /// The configured default worktree, else the one on the repository's
    /// default branch, else the first listed.
    pub fn default_worktree(&self) -> Result<Option<Worktree>> {
        let worktrees = self.list()?;

        if let Some(name) = self.config.default_worktree() {
            return Ok(self.find_in(&worktrees, name).cloned());
        }

        let default_branch = self.default_branch()?;
        if let Some(worktree) = worktrees
            .iter()
            .find(|w| w.branch.as_deref() == Some(default_branch.as_str()))
        {
            return Ok(Some(worktree.clone()));
        }

        Ok(worktrees.into_iter().next())
    }

    pub fn default_branch(&self) -> Result<String> {
        self.git.default_branch(defaults::REMOTE, &self.repo_root)
    }

    /// Subject line of `rev`, if it can be read.
    pub fn commit_message(&self, rev: &str) -> Option<String> {
        if rev.is_empty() {
            return None;
        }
        self.git.commit_subject(rev, &self.repo_root).ok()
    }

    /// `(ahead, behind)` of `branch` relative to `upstream`, if computable.
    pub fn ahead_behind(&self, branch: &str, upstream: &str) -> Option<(u32, u32)> {
        self.git.ahead_behind(branch, upstream, &self.repo_root).ok()
    }

    /// Name recorded for a detached worktree when it was created.
    pub fn stored_name(&self, worktree_path: &Path) -> Option<String> {
        let git_dir = self.git.worktree_git_dir(worktree_path).ok()?;
        let name = fs::read_to_string(git_dir.join(STORED_NAME_FILE)).ok()?;
        let name = name.trim();
        (!name.is_empty()).then(|| name.to_string())
    }

    pub fn store_name(&self, worktree_path: &Path, name: &str) -> Result<()> {
        let git_dir = self.git.worktree_git_dir(worktree_path)?;
        fs::write(git_dir.join(STORED_NAME_FILE), format!("{name}\n"))?;
        Ok(())
    }

    /// Whether `worktree` is the one the working directory is in.
    pub(crate) fn is_current(&self, worktree: &Worktree) -> Result<bool> {
        Ok(self
            .current()?
            .is_some_and(|current| current.path == worktree.path))
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Whether `path` is `root` or lies below it.
///
/// Component-wise comparison first; string prefix comparison covers
/// platforms where the two spell the same directory differently.
fn path_contains(root: &Path, path: &Path) -> bool {
    if path.starts_with(root) {
        return true;
    }

    let root = root.to_string_lossy();
    let path = path.to_string_lossy();
    let root = root.trim_end_matches(std::path::MAIN_SEPARATOR);
    path == root
        || path
            .strip_prefix(root)
            .is_some_and(|rest| rest.starts_with(std::path::MAIN_SEPARATOR))
}
