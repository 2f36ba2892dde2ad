use super::Context;
use crate::core::worktree::SyncReport;
use crate::core::OutputSink;
use crate::output::Output;
use crate::styles::{self, paint};
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Pulls each worktree's upstream branch into it (merging, never rebasing).
Uncommitted changes are stashed first and restored afterwards; if they no
longer apply cleanly they stay in the stash.

Syncs the current worktree unless NAMES or --all are given. With --rebase,
each branch is then rebased onto the configured default_base.

Exits with status 1 if any worktree failed to sync.
"#)]
pub struct Args {
    #[arg(help = "Worktrees to sync (default: current)")]
    pub names: Vec<String>,

    #[arg(long, conflicts_with = "names", help = "Sync every worktree")]
    pub all: bool,

    #[arg(long, help = "Rebase onto the default base after pulling")]
    pub rebase: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;

    let mut sink = OutputSink(&mut ctx.output);
    let report = if args.all {
        manager.sync_all(args.rebase, &mut sink)?
    } else {
        manager.sync_many(&args.names, args.rebase, &mut sink)?
    };

    render(&report, &mut ctx.output);

    if report.all_succeeded() {
        Ok(crate::EXIT_SUCCESS)
    } else {
        Ok(crate::EXIT_ERROR)
    }
}

fn render(report: &SyncReport, output: &mut dyn Output) {
    let use_color = styles::colors_enabled();

    for success in &report.succeeded {
        for line in success.message.lines().filter(|l| !l.is_empty()) {
            output.info(&format!("[{}] {line}", success.name));
        }
    }
    for failure in &report.failed {
        let mark = paint(styles::RED, "✗", use_color);
        output.info(&format!("[{}] {mark} {}", failure.name, failure.error));
        if failure.stashed && failure.error == "stash conflict" {
            output.warning(&format!(
                "[{}] Your changes are in the stash. Resolve the conflicts, then run 'git stash drop'.",
                failure.name
            ));
        }
    }

    let total = report.succeeded.len() + report.failed.len();
    if report.failed.is_empty() {
        output.success(&format!("Synced {total} worktree(s)"));
    } else {
        output.result(&format!(
            "Synced {} of {total} worktree(s), {} failed",
            report.succeeded.len(),
            report.failed.len()
        ));
    }
}
