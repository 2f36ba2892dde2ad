//! Error types for wt.
//!
//! Every failure the core can report is one variant of [`WtError`]. The
//! command layer wraps these in `anyhow` and maps them back to exit codes.

use std::path::PathBuf;

/// Result type for wt operations.
pub type Result<T> = std::result::Result<T, WtError>;

#[derive(Debug, thiserror::Error)]
pub enum WtError {
    /// `stdout` is kept for commands such as `pull --quiet` that report
    /// conflicts there instead of on stderr.
    #[error("Git command failed: git {command}\n{stderr}")]
    Git {
        command: String,
        stderr: String,
        stdout: String,
    },

    #[error("Git is not installed or not in PATH")]
    GitNotInstalled,

    #[error("Not in a git repository")]
    NotInRepository,

    #[error("Worktree '{name}' not found")]
    NotFound { name: String },

    #[error("Worktree '{name}' already exists at {path}\nUse 'wt switch {name}' to switch to it.")]
    AlreadyExists { name: String, path: PathBuf },

    #[error("Path {path} already exists. Please remove it or choose a different name.")]
    PathExists { path: PathBuf },

    #[error("Cannot delete current worktree.\nSwitch to a different worktree first: wt switch ^")]
    CannotDeleteCurrent,

    #[error("Worktree '{name}' has uncommitted changes:\n{status}\nuse --force to delete anyway")]
    UncommittedChanges { name: String, status: String },

    #[error("Unknown configuration key: {key}")]
    UnknownKey { key: String },

    #[error("Cannot resolve worktree paths outside a git repository")]
    NoRepoContext,

    #[error("Cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WtError {
    /// Process exit code used by the `wt` binary for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            WtError::Git { .. } | WtError::GitNotInstalled | WtError::NotInRepository => {
                crate::EXIT_GIT_ERROR
            }
            WtError::NotFound { .. } => crate::EXIT_NOT_FOUND,
            WtError::Cancelled => crate::EXIT_CANCELLED,
            _ => crate::EXIT_ERROR,
        }
    }
}
