//! Command layer: clap definitions and one module per `wt` subcommand.
//!
//! Each module exposes `Args` and `run(args, ctx) -> Result<i32>`, where the
//! `i32` is the process exit code. Business logic lives in [`crate::core`];
//! commands only resolve names, call it and render what comes back.

pub mod clean;
pub mod completions;
pub mod config;
pub mod delete;
pub mod diff;
pub mod init;
pub mod list;
pub mod run;
pub mod shell_init;
pub mod status;
pub mod switch;
pub mod sync;

use crate::core::repo;
use crate::core::worktree::previous::PreviousWorktree;
use crate::core::worktree::{Worktree, WorktreeManager};
use crate::git::GitCommand;
use crate::output::{CliOutput, Output, OutputConfig};
use crate::WtError;
use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wt")]
#[command(version = crate::VERSION)]
#[command(about = "Git worktree manager for parallel development workflows")]
#[command(long_about = r#"
Manage one git worktree per branch: create and switch between them, keep
them in sync with their upstream branches, and clean up the ones whose
branches were merged or deleted.

Worktree names are branch names without the configured prefix: with the
default prefix "feature", the worktree "login" works on "feature/login".

Special names: "-" is the previously used worktree, "^" the default one.
"#)]
pub struct Cli {
    #[arg(short, long, global = true, help = "Be verbose; show detailed progress")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Only print errors and results")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write a configuration file with custom defaults
    Init(init::Args),
    /// Switch to a worktree, optionally creating it
    Switch(switch::Args),
    /// List all worktrees
    List(list::Args),
    /// Show status of all worktrees
    Status(status::Args),
    /// Compare committed changes between worktrees
    Diff(diff::Args),
    /// Delete a worktree and optionally its branch
    Delete(delete::Args),
    /// Remove worktrees for merged or deleted branches
    Clean(clean::Args),
    /// Pull upstream changes into worktrees
    Sync(sync::Args),
    /// Run a shell command inside a worktree
    Run(run::Args),
    /// View or modify configuration
    Config(config::Args),
    /// Print the shell function that lets `wt switch` change directory
    ShellInit(shell_init::Args),
    /// Generate shell completion scripts
    Completions(completions::Args),
}

/// Per-invocation state shared by commands.
pub struct Context {
    pub git: GitCommand,
    pub cwd: PathBuf,
    pub output: CliOutput,
}

impl Context {
    pub fn new(quiet: bool, verbose: bool) -> Result<Self> {
        Ok(Self {
            git: GitCommand::new(quiet),
            cwd: std::env::current_dir().context("Could not read the current directory")?,
            output: CliOutput::new(OutputConfig::new(quiet, verbose)),
        })
    }

    /// Directory of the repository the user is in.
    pub fn manager(&self) -> Result<WorktreeManager> {
        if !repo::is_git_repository(&self.git, &self.cwd)? {
            return Err(WtError::NotInRepository.into());
        }
        Ok(WorktreeManager::open(self.git.clone(), &self.cwd)?)
    }

    /// The "previous worktree" pointer of the repository the user is in.
    pub fn previous(&self) -> Result<PreviousWorktree> {
        let common_dir = repo::git_common_dir(&self.git, &self.cwd)?;
        Ok(PreviousWorktree::for_repo(&common_dir))
    }
}

/// Run the parsed command line and return the exit code.
pub fn dispatch(cli: Cli) -> Result<i32> {
    let needs_git = !matches!(
        cli.command,
        Command::Init(_) | Command::Config(_) | Command::ShellInit(_) | Command::Completions(_)
    );
    if needs_git {
        GitCommand::ensure_installed()?;
    }

    let mut ctx = Context::new(cli.quiet, cli.verbose)?;
    match cli.command {
        Command::Init(args) => init::run(args, &mut ctx),
        Command::Switch(args) => switch::run(args, &mut ctx),
        Command::List(args) => list::run(args, &mut ctx),
        Command::Status(args) => status::run(args, &mut ctx),
        Command::Diff(args) => diff::run(args, &mut ctx),
        Command::Delete(args) => delete::run(args, &mut ctx),
        Command::Clean(args) => clean::run(args, &mut ctx),
        Command::Sync(args) => sync::run(args, &mut ctx),
        Command::Run(args) => run::run(args, &mut ctx),
        Command::Config(args) => config::run(args, &mut ctx),
        Command::ShellInit(args) => shell_init::run(args, &mut ctx),
        Command::Completions(args) => completions::run(args),
    }
}

/// Resolve a user-supplied worktree name, including `-` (previous) and
/// `^` (default).
pub(crate) fn resolve_worktree(
    manager: &WorktreeManager,
    previous: &PreviousWorktree,
    name: &str,
) -> Result<Worktree> {
    match name {
        "-" => {
            let path = previous.load()?.context("No previous worktree")?;
            let worktrees = manager.list()?;
            worktrees
                .into_iter()
                .find(|w| same_dir(&w.path, &path))
                .ok_or_else(|| {
                    WtError::NotFound {
                        name: path.display().to_string(),
                    }
                    .into()
                })
        }
        "^" => manager
            .default_worktree()?
            .context("Cannot determine default worktree"),
        _ => manager.find_by_name(name)?.ok_or_else(|| {
            WtError::NotFound {
                name: name.to_string(),
            }
            .into()
        }),
    }
}

fn same_dir(a: &std::path::Path, b: &std::path::Path) -> bool {
    a == b
        || matches!(
            (a.canonicalize(), b.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}

/// Write `text` followed by a newline as raw output.
pub(crate) fn print_line(output: &mut dyn Output, text: &str) {
    output.raw(&format!("{text}\n"));
}
