use super::{resolve_worktree, Context};
use crate::{log_debug, WtError};
use anyhow::{Context as _, Result};
use std::process::Command;

#[derive(clap::Args)]
#[command(long_about = r#"
Runs COMMAND with `sh -c` inside the worktree NAME ("-" and "^" work as in
`wt switch`) and exits with the command's exit status.
"#)]
pub struct Args {
    #[arg(help = "Worktree name, \"-\" (previous) or \"^\" (default)")]
    pub name: String,

    #[arg(help = "Shell command to run")]
    pub command: String,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;
    let previous = ctx.previous()?;
    let worktree = resolve_worktree(&manager, &previous, &args.name)?;

    if !worktree.path.is_dir() {
        return Err(WtError::NotFound {
            name: worktree.path.display().to_string(),
        }
        .into());
    }

    log_debug!("sh -c {:?} (in {})", args.command, worktree.path.display());
    let status = Command::new("sh")
        .arg("-c")
        .arg(&args.command)
        .current_dir(&worktree.path)
        .status()
        .context("Failed to run command")?;

    Ok(status.code().unwrap_or(crate::EXIT_ERROR))
}
