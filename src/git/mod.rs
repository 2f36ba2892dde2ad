//! Gateway to the `git` command line.
//!
//! Every git invocation in wt goes through [`GitCommand::run`], which
//! captures stdout/stderr and turns failures into [`WtError`] values. The
//! submodules add one typed method per git operation on top of it.

use crate::error::{Result, WtError};
use crate::log_debug;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};
use which::which;

mod branch;
mod config;
mod refs;
mod remote;
mod stash;
mod worktree;

pub use remote::{PullOutcome, RebaseOutcome};
pub use worktree::{parse_porcelain, PorcelainWorktree};

/// Captured result of a finished git process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl GitOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Stdout with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.stdout.trim()
    }
}

#[derive(Debug, Clone, Default)]
pub struct GitCommand {
    pub(crate) quiet: bool,
}

impl GitCommand {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Check that a `git` executable can be found on `PATH`.
    pub fn ensure_installed() -> Result<()> {
        which("git").map(|_| ()).map_err(|_| WtError::GitNotInstalled)
    }

    /// Run `git <args>` in `cwd`.
    ///
    /// With `must_succeed`, a non-zero exit becomes [`WtError::Git`] carrying
    /// the joined command line and git's output. Without it, the caller gets
    /// the exit code and decides.
    pub fn run(&self, args: &[&str], cwd: &Path, must_succeed: bool) -> Result<GitOutput> {
        let command = args.join(" ");
        log_debug!("git {command} (in {})", cwd.display());

        if !cwd.is_dir() {
            return Err(WtError::Io(std::io::Error::new(
                ErrorKind::NotFound,
                format!("Directory does not exist: {}", cwd.display()),
            )));
        }

        let output = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => WtError::GitNotInstalled,
                _ => WtError::Io(e),
            })?;

        let result = GitOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if must_succeed && !result.success() {
            return Err(WtError::Git {
                command,
                stderr: result.stderr.trim().to_string(),
                stdout: result.stdout.trim().to_string(),
            });
        }

        Ok(result)
    }

    /// Run git with inherited stdio (for output meant for the terminal,
    /// e.g. `git diff`). Returns the exit code.
    pub fn run_passthrough(&self, args: &[&str], cwd: &Path) -> Result<i32> {
        log_debug!("git {} (in {}, passthrough)", args.join(" "), cwd.display());

        let status = Command::new("git")
            .args(args)
            .current_dir(cwd)
            .status()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => WtError::GitNotInstalled,
                _ => WtError::Io(e),
            })?;

        Ok(status.code().unwrap_or(-1))
    }

    /// Convenience for commands whose only interesting output is stdout.
    pub(crate) fn output_of(&self, args: &[&str], cwd: &Path) -> Result<String> {
        Ok(self.run(args, cwd, true)?.trimmed().to_string())
    }
}
