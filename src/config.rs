//! Configuration for wt.
//!
//! A single TOML file, `.wt.toml`, holds the user's settings. It lives in the
//! directory named by `WT_CONFIG`, or in the home directory otherwise. Missing
//! keys fall back to built-in defaults.
//!
//! # Config Keys
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `prefix` | `"feature"` | Namespace prepended to worktree names to form branch names |
//! | `path_pattern` | `"../{repo}-{name}"` | Where new worktrees go, relative to the repository root |
//! | `default_base` | `"origin/main"` | Base ref for new branches |
//! | `default_worktree` | unset | Worktree that `^` refers to (auto-detected when unset) |
//!
//! `path_pattern` understands `{repo}` (repository directory name), `{name}`
//! and `{branch}`.

use crate::error::{Result, WtError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Environment variable naming the directory that holds `.wt.toml`.
pub const CONFIG_DIR_ENV: &str = "WT_CONFIG";

/// File name of the configuration file.
pub const CONFIG_FILE_NAME: &str = ".wt.toml";

/// Default values for settings.
pub mod defaults {
    pub const PREFIX: &str = "feature";
    pub const PATH_PATTERN: &str = "../{repo}-{name}";
    pub const DEFAULT_BASE: &str = "origin/main";
    /// Remote used for push wiring and merged-branch detection.
    pub const REMOTE: &str = "origin";
}

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub mod keys {
    pub const PREFIX: &str = "prefix";
    pub const PATH_PATTERN: &str = "path_pattern";
    pub const DEFAULT_BASE: &str = "default_base";
    pub const DEFAULT_WORKTREE: &str = "default_worktree";

    pub const ALL: &[&str] = &[PREFIX, PATH_PATTERN, DEFAULT_BASE, DEFAULT_WORKTREE];
}

/// On-disk shape of `.wt.toml`. Unknown keys are ignored when reading and
/// never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
struct Settings {
    prefix: String,
    path_pattern: String,
    default_base: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_worktree: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: defaults::PREFIX.to_string(),
            path_pattern: defaults::PATH_PATTERN.to_string(),
            default_base: defaults::DEFAULT_BASE.to_string(),
            default_worktree: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    settings: Settings,
    path: PathBuf,
    repo_root: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the resolved config directory.
    ///
    /// `repo_root` binds the repository used for path resolution; without it,
    /// [`Config::resolve_worktree_path`] fails with [`WtError::NoRepoContext`].
    pub fn load(repo_root: Option<&Path>) -> Result<Self> {
        Self::load_from_dir(&Self::config_dir()?, repo_root)
    }

    /// Load configuration from `.wt.toml` inside `dir`.
    pub fn load_from_dir(dir: &Path, repo_root: Option<&Path>) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        let settings = if path.exists() {
            let contents = fs::read_to_string(&path).map_err(|e| {
                WtError::Config(format!("Failed to read config from {}: {e}", path.display()))
            })?;
            toml::from_str(&contents).map_err(|e| {
                WtError::Config(format!("Failed to read config from {}: {e}", path.display()))
            })?
        } else {
            Settings::default()
        };

        Ok(Self {
            settings,
            path,
            repo_root: repo_root.map(Path::to_path_buf),
        })
    }

    /// Directory holding the config file: `$WT_CONFIG`, else the home directory.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }
        dirs::home_dir()
            .ok_or_else(|| WtError::Config("Could not determine home directory".to_string()))
    }

    /// Path of the config file this configuration reads from and saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn repo_root(&self) -> Option<&Path> {
        self.repo_root.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.settings.prefix
    }

    pub fn path_pattern(&self) -> &str {
        &self.settings.path_pattern
    }

    pub fn default_base(&self) -> &str {
        &self.settings.default_base
    }

    pub fn default_worktree(&self) -> Option<&str> {
        self.settings.default_worktree.as_deref()
    }

    /// Value of `key`; `Ok(None)` for a known key that is unset.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        match key {
            keys::PREFIX => Ok(Some(self.settings.prefix.clone())),
            keys::PATH_PATTERN => Ok(Some(self.settings.path_pattern.clone())),
            keys::DEFAULT_BASE => Ok(Some(self.settings.default_base.clone())),
            keys::DEFAULT_WORKTREE => Ok(self.settings.default_worktree.clone()),
            _ => Err(WtError::UnknownKey {
                key: key.to_string(),
            }),
        }
    }

    /// Set `key` in memory. Call [`Config::save`] to persist.
    ///
    /// An empty `default_worktree` clears the override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            keys::PREFIX => self.settings.prefix = value.to_string(),
            keys::PATH_PATTERN => self.settings.path_pattern = value.to_string(),
            keys::DEFAULT_BASE => self.settings.default_base = value.to_string(),
            keys::DEFAULT_WORKTREE => {
                self.settings.default_worktree =
                    (!value.is_empty()).then(|| value.to_string());
            }
            _ => {
                return Err(WtError::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    /// All keys with their current values, in schema order.
    pub fn entries(&self) -> Vec<(&'static str, Option<String>)> {
        keys::ALL
            .iter()
            .map(|key| (*key, self.get(key).ok().flatten()))
            .collect()
    }

    /// Write the configuration file, creating parent directories.
    ///
    /// Unset keys are written commented out. The file is written next to its
    /// final location and renamed into place.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut contents = toml::to_string(&self.settings)
            .map_err(|e| WtError::Config(format!("Failed to serialize config: {e}")))?;
        for (key, value) in self.entries() {
            if value.is_none() {
                contents.push_str(&format!("# {key} = \n"));
            }
        }

        let tmp = self.path.with_extension("toml.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Full branch name for a worktree name: `"{prefix}/{name}"`, or `name`
    /// unchanged when the prefix is empty.
    pub fn branch_name(&self, name: &str) -> String {
        if self.settings.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}/{name}", self.settings.prefix)
        }
    }

    /// Worktree name for a branch: strips `"{prefix}/"` when present.
    pub fn worktree_name(&self, branch: &str) -> String {
        if self.settings.prefix.is_empty() {
            return branch.to_string();
        }
        branch
            .strip_prefix(&self.settings.prefix)
            .and_then(|rest| rest.strip_prefix('/'))
            .unwrap_or(branch)
            .to_string()
    }

    /// Absolute path for a new worktree, from `path_pattern`.
    pub fn resolve_worktree_path(&self, name: &str, branch: &str) -> Result<PathBuf> {
        let repo_root = self.repo_root.as_deref().ok_or(WtError::NoRepoContext)?;
        let resolved = self
            .settings
            .path_pattern
            .replace("{repo}", &repo_name(repo_root))
            .replace("{name}", name)
            .replace("{branch}", branch);

        Ok(resolve_path(&repo_root.join(resolved)))
    }

    /// Recover a worktree name from its directory, for detached worktrees
    /// that have no stored name.
    ///
    /// Only the last component of `path_pattern` is matched. The repository
    /// root itself never yields a name.
    pub fn infer_name_from_path(&self, worktree_path: &Path) -> Option<String> {
        let repo_root = self.repo_root.as_deref()?;
        if worktree_path == repo_root {
            return None;
        }

        let pattern = Path::new(&self.settings.path_pattern)
            .file_name()?
            .to_str()?
            .to_string();
        let dir_name = worktree_path.file_name()?.to_str()?;

        let re = pattern_regex(&pattern, &repo_name(repo_root))?;
        let caps = re.captures(dir_name)?;
        if let Some(name) = caps.name("name") {
            return Some(name.as_str().to_string());
        }
        caps.name("branch")
            .map(|branch| self.worktree_name(branch.as_str()))
    }
}

fn repo_name(repo_root: &Path) -> String {
    repo_root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compile one path component of a pattern into an anchored regex.
fn pattern_regex(component: &str, repo: &str) -> Option<Regex> {
    if !component.contains("{name}") && !component.contains("{branch}") {
        return None;
    }

    let mut source = regex::escape(component)
        .replace(r"\{repo\}", &regex::escape(repo))
        .replacen(r"\{name\}", "(?P<name>.+)", 1)
        .replacen(r"\{branch\}", "(?P<branch>.+)", 1);
    source = source.replace(r"\{name\}", ".+").replace(r"\{branch\}", ".+");

    Regex::new(&format!("^{source}$")).ok()
}

/// Lexically normalize `path` (dropping `.` and folding `..`), then
/// canonicalize the deepest part that exists on disk.
fn resolve_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }

    let mut existing = normalized.as_path();
    let mut rest = Vec::new();
    while !existing.exists() {
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return normalized,
        }
    }

    let mut resolved = existing
        .canonicalize()
        .unwrap_or_else(|_| existing.to_path_buf());
    for name in rest.iter().rev() {
        resolved.push(name);
    }
    resolved
}
