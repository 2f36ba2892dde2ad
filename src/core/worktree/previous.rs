//! The "previous worktree" pointer behind `wt switch -`.
//!
//! The pointer is explicit session state: callers decide where it lives
//! (normally [`PreviousWorktree::for_repo`], a file inside the git common
//! dir shared by all worktrees) and read or write it themselves. The
//! directory itself stays stateless.

use crate::error::Result;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const STATE_DIR: &str = "wt";
const STATE_FILE: &str = "previous-worktree";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviousWorktree {
    file: PathBuf,
}

impl PreviousWorktree {
    /// State for the repository whose git common dir is `git_common_dir`.
    pub fn for_repo(git_common_dir: &Path) -> Self {
        Self::at(git_common_dir.join(STATE_DIR).join(STATE_FILE))
    }

    /// State stored in an arbitrary file.
    pub fn at(file: impl Into<PathBuf>) -> Self {
        Self { file: file.into() }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// The recorded worktree path. `None` when nothing was recorded or the
    /// recorded directory has since been removed.
    pub fn load(&self) -> Result<Option<PathBuf>> {
        let content = match fs::read_to_string(&self.file) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let recorded = content.trim();
        if recorded.is_empty() {
            return Ok(None);
        }
        let path = PathBuf::from(recorded);
        Ok(path.is_dir().then_some(path))
    }

    pub fn save(&self, worktree_path: &Path) -> Result<()> {
        if let Some(dir) = self.file.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.file, format!("{}\n", worktree_path.display()))?;
        Ok(())
    }
}
