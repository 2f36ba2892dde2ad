//! wt - git worktree manager for parallel development workflows.
//!
//! The crate is layered the same way a command flows through it:
//! [`commands`] parses arguments and renders results, [`core`] holds the
//! worktree directory and sync engine, [`config`] resolves names and paths,
//! and [`git`] is the only place that spawns `git`.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod git;
pub mod logging;
pub mod output;
pub mod styles;

pub use error::{Result, WtError};

/// Version string shown by `wt --version` (includes the commit for dev builds).
pub const VERSION: &str = env!("WT_VERSION_DISPLAY");

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
pub const EXIT_INVALID_ARGS: i32 = 2;
pub const EXIT_GIT_ERROR: i32 = 3;
pub const EXIT_NOT_FOUND: i32 = 4;
pub const EXIT_CANCELLED: i32 = 5;

/// Exit code for an error returned by a command.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<WtError>()
        .map_or(EXIT_ERROR, WtError::exit_code)
}
