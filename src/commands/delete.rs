use super::Context;
use crate::core::OutputSink;
use crate::output::Output;
use crate::WtError;
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Removes the worktree NAME and deletes its branch.

Without --force, a worktree with uncommitted changes is refused and one
with unpushed commits asks for confirmation first. The current worktree
cannot be deleted. Declining the confirmation exits with status 5.
"#)]
pub struct Args {
    #[arg(help = "Worktree to delete")]
    pub name: String,

    #[arg(long, help = "Delete despite uncommitted changes or unpushed commits")]
    pub force: bool,

    #[arg(long, help = "Keep the branch after removing the worktree")]
    pub keep_branch: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;
    let mut sink = OutputSink(&mut ctx.output);

    if !manager.delete(&args.name, args.force, args.keep_branch, &mut sink)? {
        return Err(WtError::Cancelled.into());
    }

    ctx.output
        .success(&format!("Deleted worktree '{}'", args.name));
    Ok(crate::EXIT_SUCCESS)
}
