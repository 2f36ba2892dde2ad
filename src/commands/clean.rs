use super::Context;
use crate::core::OutputSink;
use crate::output::Output;
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Removes worktrees (and their branches) whose branch was merged into the
default branch on origin, or whose remote branch was deleted.

Only worktrees on prefixed branches are considered; the default branch is
never touched. Asks once for the whole batch unless --force is given.
"#)]
pub struct Args {
    #[arg(long, help = "Show what would be removed without removing anything")]
    pub dry_run: bool,

    #[arg(long, help = "Skip the confirmation prompt")]
    pub force: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;

    let candidates = manager.clean_candidates()?;
    if candidates.is_empty() {
        ctx.output.info("No worktrees to clean");
        return Ok(crate::EXIT_SUCCESS);
    }

    if args.dry_run {
        ctx.output.info("The following worktrees would be removed:");
        for candidate in &candidates {
            ctx.output.info(&format!(
                "  {:20} ({})",
                candidate.worktree.name, candidate.reason
            ));
        }
        return Ok(crate::EXIT_SUCCESS);
    }

    let mut sink = OutputSink(&mut ctx.output);
    let removed = manager.clean_merged(false, args.force, &mut sink)?;
    for name in &removed {
        ctx.output.list_item(name);
    }
    if !removed.is_empty() {
        ctx.output
            .success(&format!("Removed {} worktree(s)", removed.len()));
    }

    Ok(crate::EXIT_SUCCESS)
}
