//! Repository discovery.
//!
//! Thin wrappers around `GitCommand` that answer "which repository am I
//! in" for the command layer before a `WorktreeManager` exists.

use crate::error::{Result, WtError};
use crate::git::GitCommand;
use std::path::{Path, PathBuf};

/// Check whether `cwd` is inside a git repository.
pub fn is_git_repository(git: &GitCommand, cwd: &Path) -> Result<bool> {
    git.is_inside_git_repo(cwd)
}

/// Root of the main worktree: the first entry git reports.
///
/// Every linked worktree resolves to the same root, so `{repo}` and
/// relative path patterns mean the same thing wherever `wt` runs.
pub fn main_worktree_root(git: &GitCommand, cwd: &Path) -> Result<PathBuf> {
    let worktrees = git.worktree_list(cwd)?;
    match worktrees.into_iter().next() {
        Some(main) => Ok(main.path),
        None => Err(WtError::Git {
            command: "worktree list --porcelain".to_string(),
            stderr: "no worktrees reported".to_string(),
            stdout: String::new(),
        }),
    }
}

/// Canonical git common directory, shared by every worktree of the repo.
pub fn git_common_dir(git: &GitCommand, cwd: &Path) -> Result<PathBuf> {
    let dir = git.git_common_dir(cwd)?;
    Ok(dir.canonicalize().unwrap_or(dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::tempdir;

    fn init_repo(dir: &Path) {
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .args(args)
                .current_dir(dir)
                .output()
                .unwrap();
            assert!(status.status.success(), "git {args:?} failed");
        };
        run(&["init", "-q", "-b", "main"]);
        run(&["config", "user.email", "test@example.com"]);
        run(&["config", "user.name", "Test"]);
        run(&["commit", "-q", "--allow-empty", "-m", "init"]);
    }

    #[test]
    fn test_is_git_repository() {
        let git = GitCommand::new(true);
        let repo = tempdir().unwrap();
        init_repo(repo.path());
        assert!(is_git_repository(&git, repo.path()).unwrap());

        let plain = tempdir().unwrap();
        // A tempdir may itself live below a repository on some machines.
        if !git.is_inside_git_repo(plain.path().parent().unwrap()).unwrap() {
            assert!(!is_git_repository(&git, plain.path()).unwrap());
        }
    }

    #[test]
    fn test_main_worktree_root_from_subdirectory() {
        let git = GitCommand::new(true);
        let repo = tempdir().unwrap();
        init_repo(repo.path());
        let sub = repo.path().join("a/b");
        std::fs::create_dir_all(&sub).unwrap();

        let root = main_worktree_root(&git, &sub).unwrap();
        assert_eq!(
            root.canonicalize().unwrap(),
            repo.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_git_common_dir_is_absolute() {
        let git = GitCommand::new(true);
        let repo = tempdir().unwrap();
        init_repo(repo.path());

        let dir = git_common_dir(&git, repo.path()).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with(".git"));
    }
}
