use super::Context;
use crate::WtError;
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Shows `git diff BASE WORKTREE` for the committed state of two worktrees.
BASE defaults to the current worktree. Arguments after `--` are passed to
git diff unchanged, e.g. `wt diff login -- --stat`.
"#)]
pub struct Args {
    #[arg(help = "Worktree to compare")]
    pub worktree: String,

    #[arg(help = "Worktree to compare against (default: current)")]
    pub base: Option<String>,

    #[arg(last = true, help = "Extra arguments for git diff")]
    pub diff_args: Vec<String>,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;

    let target = manager
        .find_by_name(&args.worktree)?
        .ok_or_else(|| WtError::NotFound {
            name: args.worktree.clone(),
        })?;

    let base = match &args.base {
        Some(name) => manager
            .find_by_name(name)?
            .ok_or_else(|| WtError::NotFound { name: name.clone() })?,
        None => manager
            .current()?
            .ok_or_else(|| anyhow::anyhow!("Cannot determine current worktree"))?,
    };

    let mut git_args = vec!["diff", base.reference(), target.reference()];
    git_args.extend(args.diff_args.iter().map(String::as_str));

    Ok(manager.git().run_passthrough(&git_args, manager.repo_root())?)
}
