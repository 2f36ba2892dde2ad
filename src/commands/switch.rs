use super::{print_line, resolve_worktree, Context};
use crate::core::OutputSink;
use crate::output::{CliOutput, Output};
use crate::WtError;
use anyhow::Result;
use std::path::Path;

#[derive(clap::Args)]
#[command(long_about = r#"
Switches to the worktree NAME. Use "-" for the previously used worktree and
"^" for the default worktree.

With --create, a missing worktree is created: a new branch "<prefix>/NAME"
starting at --base (default: the configured default_base), or the existing
branch of that name. --detached creates a detached worktree at --base
(default: the current HEAD) that remembers NAME.

A process cannot change its parent shell's directory, so without the shell
integration from `wt shell-init` this prints the `cd` to run.
"#)]
pub struct Args {
    #[arg(help = "Worktree name, \"-\" (previous) or \"^\" (default)")]
    pub name: String,

    #[arg(short, long, help = "Create the worktree if it does not exist")]
    pub create: bool,

    #[arg(short, long, value_name = "REF", help = "Base for a new worktree")]
    pub base: Option<String>,

    #[arg(short, long, help = "Create the worktree in detached HEAD state")]
    pub detached: bool,

    #[arg(long, hide = true, help = "Print only the target path (shell integration)")]
    pub shell_helper: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;
    let previous = ctx.previous()?;

    // The wrapper reads stdout as a path, so everything else stays off it.
    let mut helper_output = CliOutput::quiet();
    let output: &mut dyn Output = if args.shell_helper {
        &mut helper_output
    } else {
        &mut ctx.output
    };

    let target = match resolve_worktree(&manager, &previous, &args.name) {
        Ok(worktree) => worktree.path,
        Err(err) if is_not_found(&err) && args.create && !is_special(&args.name) => {
            let mut sink = OutputSink(&mut *output);
            let path = manager.create(
                &args.name,
                args.base.as_deref(),
                args.detached,
                &mut sink,
            )?;
            output.success(&format!("Created worktree '{}'", args.name));
            path
        }
        Err(err) if is_not_found(&err) && !is_special(&args.name) => {
            let available: Vec<String> = manager.list()?.into_iter().map(|w| w.name).collect();
            output.error(&format!("Available worktrees: {}", available.join(", ")));
            output.error(&format!(
                "Use 'wt switch -c {}' to create it.",
                args.name
            ));
            return Err(err);
        }
        Err(err) => return Err(err),
    };

    if let Some(current) = manager.current()? {
        if current.path != target {
            previous.save(&current.path)?;
        }
    }

    report(output, &args, &target);
    Ok(crate::EXIT_SUCCESS)
}

fn report(output: &mut dyn Output, args: &Args, target: &Path) {
    if args.shell_helper {
        print_line(output, &target.display().to_string());
    } else {
        output.result(&format!(
            "To switch to worktree '{}' run: cd {}",
            args.name,
            target.display()
        ));
    }
}

fn is_special(name: &str) -> bool {
    matches!(name, "-" | "^")
}

fn is_not_found(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<WtError>(), Some(WtError::NotFound { .. }))
}
