use super::{print_line, Context};
use crate::core::worktree::{Worktree, WorktreeManager};
use crate::output::Output;
use crate::styles::{self, paint};
use anyhow::Result;
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, Modify, Style, Width},
};

const SUBJECT_WIDTH: usize = 50;

#[derive(clap::Args)]
#[command(long_about = r#"
Lists every worktree with its name, short commit, commit subject and path.
The current worktree is marked with "*".

Use --name-only to show the files changed by each worktree's HEAD commit,
or --json for machine-readable output.
"#)]
pub struct Args {
    #[arg(long, help = "Show files changed by each worktree's last commit")]
    pub name_only: bool,

    #[arg(long, conflicts_with = "name_only", help = "Output in JSON format")]
    pub json: bool,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    #[serde(flatten)]
    worktree: &'a Worktree,
    is_current: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let manager = ctx.manager()?;
    let worktrees = manager.list()?;
    let current = manager.current()?.map(|w| w.path);
    let is_current = |w: &Worktree| current.as_ref() == Some(&w.path);

    if args.json {
        let entries: Vec<JsonEntry> = worktrees
            .iter()
            .map(|worktree| JsonEntry {
                worktree,
                is_current: is_current(worktree),
            })
            .collect();
        print_line(&mut ctx.output, &serde_json::to_string_pretty(&entries)?);
    } else if args.name_only {
        print_changed_files(&manager, &worktrees, &mut ctx.output);
    } else {
        print_table(&worktrees, &is_current, &mut ctx.output);
    }

    Ok(crate::EXIT_SUCCESS)
}

fn print_table(
    worktrees: &[Worktree],
    is_current: &dyn Fn(&Worktree) -> bool,
    output: &mut dyn Output,
) {
    if worktrees.is_empty() {
        return;
    }

    let use_color = styles::colors_enabled();
    let mut builder = Builder::new();
    for worktree in worktrees {
        let marker = if is_current(worktree) {
            paint(styles::CYAN, "*", use_color)
        } else {
            " ".to_string()
        };
        let name = if worktree.locked {
            format!("{} (locked)", worktree.name)
        } else {
            worktree.name.clone()
        };
        builder.push_record([
            marker,
            name,
            paint(styles::DIM, &worktree.commit, use_color),
            worktree.commit_message.clone(),
            worktree.path.display().to_string(),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::blank()).with(
        Modify::new(Columns::new(3..4)).with(Width::truncate(SUBJECT_WIDTH).suffix("...")),
    );

    print_line(output, &table.to_string());
}

fn print_changed_files(manager: &WorktreeManager, worktrees: &[Worktree], output: &mut dyn Output) {
    for worktree in worktrees {
        print_line(output, &format!("{} ({}):", worktree.name, worktree.commit));
        match manager
            .git()
            .changed_files_in_commit(&worktree.commit, manager.repo_root())
        {
            Ok(changed) if changed.trim().is_empty() => print_line(output, "  (no changes)"),
            Ok(changed) => {
                for line in changed.lines().filter(|l| !l.trim().is_empty()) {
                    print_line(output, &format!("  {line}"));
                }
            }
            Err(_) => print_line(output, "  (error reading commit)"),
        }
        print_line(output, "");
    }
}
