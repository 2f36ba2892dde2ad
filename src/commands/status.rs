use super::{print_line, Context};
use crate::core::worktree::WorktreeStatus;
use crate::output::Output;
use crate::styles::{self, paint};
use anyhow::Result;

/// Uncommitted files shown per worktree before summarising the rest.
const MAX_FILES_SHOWN: usize = 5;

#[derive(clap::Args)]
pub struct Args {}

pub fn run(_args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;
    let use_color = styles::colors_enabled();

    for worktree in manager.list()? {
        let status = manager.status(&worktree)?;
        let state = if status.is_clean() {
            paint(styles::GREEN, "clean", use_color)
        } else {
            paint(
                styles::YELLOW,
                &format!("{} uncommitted changes", status.uncommitted_count),
                use_color,
            )
        };
        print_line(
            &mut ctx.output,
            &format!("{} ({}) - {state}", worktree.name, worktree.commit),
        );

        print_files(&status, &mut ctx.output);

        if let Some(line) = tracking_line(&status) {
            print_line(&mut ctx.output, &format!("  {line}"));
        } else if !worktree.is_detached() {
            print_line(&mut ctx.output, "  (no upstream)");
        }

        print_line(&mut ctx.output, "");
    }

    Ok(crate::EXIT_SUCCESS)
}

fn print_files(status: &WorktreeStatus, output: &mut dyn Output) {
    for line in status.uncommitted_files.lines().take(MAX_FILES_SHOWN) {
        print_line(output, &format!("  {line}"));
    }
    if status.uncommitted_count > MAX_FILES_SHOWN {
        print_line(
            output,
            &format!("  ... and {} more", status.uncommitted_count - MAX_FILES_SHOWN),
        );
    }
}

/// `✓ up to date with origin/x`, `↑2 ↓1 origin/x`, or `None` without an upstream.
fn tracking_line(status: &WorktreeStatus) -> Option<String> {
    let upstream = status.upstream.as_deref()?;
    if status.ahead == 0 && status.behind == 0 {
        return Some(format!("✓ up to date with {upstream}"));
    }

    let mut parts = Vec::new();
    if status.ahead > 0 {
        parts.push(format!("↑{}", status.ahead));
    }
    if status.behind > 0 {
        parts.push(format!("↓{}", status.behind));
    }
    Some(format!("{} {upstream}", parts.join(" ")))
}
