use super::GitCommand;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// One record of `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PorcelainWorktree {
    pub path: PathBuf,
    /// Full commit id of the checked-out HEAD (empty for bare entries).
    pub head: String,
    /// Branch name without `refs/heads/`; `None` means detached (or bare).
    pub branch: Option<String>,
    pub locked: bool,
    pub bare: bool,
}

impl PorcelainWorktree {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            head: String::new(),
            branch: None,
            locked: false,
            bare: false,
        }
    }
}

/// Parse the porcelain output of `git worktree list`.
///
/// Records are separated by blank lines:
/// ```text
/// worktree /path/to/worktree
/// HEAD <sha>
/// branch refs/heads/branch-name
/// locked <optional reason>
/// ```
/// Detached entries carry `detached` instead of `branch`. The last record
/// does not need a trailing blank line.
pub fn parse_porcelain(output: &str) -> Vec<PorcelainWorktree> {
    let mut entries = Vec::new();
    let mut current: Option<PorcelainWorktree> = None;

    for line in output.lines() {
        if line.is_empty() {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            continue;
        }

        if let Some(path) = line.strip_prefix("worktree ") {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            current = Some(PorcelainWorktree::new(PathBuf::from(path)));
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        if let Some(head) = line.strip_prefix("HEAD ") {
            entry.head = head.to_string();
        } else if let Some(branch_ref) = line.strip_prefix("branch ") {
            let branch = branch_ref.strip_prefix("refs/heads/").unwrap_or(branch_ref);
            entry.branch = (!branch.is_empty()).then(|| branch.to_string());
        } else if line == "detached" {
            entry.branch = None;
        } else if line == "bare" {
            entry.bare = true;
        } else if line == "locked" || line.starts_with("locked ") {
            entry.locked = true;
        }
    }

    if let Some(entry) = current.take() {
        entries.push(entry);
    }

    entries
}

impl GitCommand {
    pub fn worktree_list(&self, cwd: &Path) -> Result<Vec<PorcelainWorktree>> {
        let output = self.run(&["worktree", "list", "--porcelain"], cwd, true)?;
        Ok(parse_porcelain(&output.stdout))
    }

    /// Add a worktree at `path`.
    ///
    /// - `detached`: `git worktree add --detach <path> [base]`
    /// - `create_branch`: `git worktree add -b <branch> <path> [base]`
    /// - otherwise the existing `branch` is checked out.
    pub fn worktree_add(
        &self,
        path: &Path,
        branch: &str,
        create_branch: bool,
        base: Option<&str>,
        detached: bool,
        cwd: &Path,
    ) -> Result<()> {
        let path_str = path.to_string_lossy();
        let mut args = vec!["worktree", "add"];

        if self.quiet {
            args.push("--quiet");
        }

        if detached {
            args.push("--detach");
            args.push(&*path_str);
            args.extend(base);
        } else if create_branch {
            args.extend(["-b", branch]);
            args.push(&*path_str);
            args.extend(base);
        } else {
            args.push(&*path_str);
            args.push(branch);
        }

        self.run(&args, cwd, true)?;
        Ok(())
    }

    pub fn worktree_remove(&self, path: &Path, force: bool, cwd: &Path) -> Result<()> {
        let path_str = path.to_string_lossy();
        let mut args = vec!["worktree", "remove", &*path_str];
        if force {
            args.push("--force");
        }

        self.run(&args, cwd, true)?;
        Ok(())
    }

    /// Drop administrative data for worktrees whose directories are gone.
    pub fn worktree_prune(&self, cwd: &Path) -> Result<()> {
        self.run(&["worktree", "prune"], cwd, true)?;
        Ok(())
    }

    /// The private git directory of a worktree (`.git/worktrees/<id>` for
    /// linked worktrees), as an absolute path.
    pub fn worktree_git_dir(&self, worktree_path: &Path) -> Result<PathBuf> {
        let dir = self.output_of(&["rev-parse", "--absolute-git-dir"], worktree_path)?;
        Ok(PathBuf::from(dir))
    }
}
