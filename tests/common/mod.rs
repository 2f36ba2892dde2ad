//! Git repository fixtures for integration tests.
#![allow(dead_code)]

use anyhow::{bail, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;
use wt::config::Config;
use wt::core::worktree::WorktreeManager;
use wt::git::GitCommand;

/// A repository `repo` cloned from a bare `remote.git`, both inside one
/// temporary directory, with `main` pushed and tracked.
pub struct Fixture {
    pub dir: TempDir,
    pub repo: PathBuf,
    pub remote: PathBuf,
    pub config_dir: PathBuf,
}

pub fn git(cwd: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").args(args).current_dir(cwd).output()?;
    if !output.status.success() {
        bail!(
            "git {} failed in {}: {}",
            args.join(" "),
            cwd.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn configure_identity(cwd: &Path) -> Result<()> {
    git(cwd, &["config", "user.email", "test@example.com"])?;
    git(cwd, &["config", "user.name", "Test User"])?;
    git(cwd, &["config", "commit.gpgsign", "false"])?;
    Ok(())
}

pub fn commit_file(cwd: &Path, file: &str, contents: &str, message: &str) -> Result<()> {
    fs::write(cwd.join(file), contents)?;
    git(cwd, &["add", file])?;
    git(cwd, &["commit", "-q", "-m", message])?;
    Ok(())
}

impl Fixture {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new()?;
        let root = dir.path().canonicalize()?;
        let remote = root.join("remote.git");
        let repo = root.join("repo");
        let config_dir = root.join("config");
        fs::create_dir_all(&repo)?;
        fs::create_dir_all(&config_dir)?;

        git(&root, &["init", "-q", "--bare", "-b", "main", "remote.git"])?;
        git(&repo, &["init", "-q", "-b", "main"])?;
        configure_identity(&repo)?;
        commit_file(&repo, "README.md", "hello\n", "Initial commit")?;
        git(&repo, &["remote", "add", "origin", &remote.to_string_lossy()])?;
        git(&repo, &["push", "-q", "-u", "origin", "main"])?;

        Ok(Self {
            dir,
            repo,
            remote,
            config_dir,
        })
    }

    pub fn root(&self) -> PathBuf {
        self.repo
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.repo.clone())
    }

    pub fn config(&self) -> Result<Config> {
        Ok(Config::load_from_dir(&self.config_dir, Some(&self.repo))?)
    }

    pub fn manager(&self) -> Result<WorktreeManager> {
        Ok(WorktreeManager::new(GitCommand::new(true), self.config()?)?)
    }

    /// A second clone of the remote, standing in for another developer.
    pub fn other_clone(&self) -> Result<PathBuf> {
        let other = self.root().join("other");
        if !other.exists() {
            git(
                &self.root(),
                &["clone", "-q", &self.remote.to_string_lossy(), "other"],
            )?;
            configure_identity(&other)?;
        }
        Ok(other)
    }

    /// Write a config file with `key = value` pairs.
    pub fn write_config(&self, contents: &str) -> Result<()> {
        fs::write(self.config_dir.join(".wt.toml"), contents)?;
        Ok(())
    }
}
