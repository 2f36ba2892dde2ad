use super::{print_line, Context};
use crate::config::Config;
use crate::core::repo;
use crate::output::Output;
use anyhow::{Context as _, Result};
use clap::CommandFactory;
use std::fs;
use std::process::Command;

#[derive(clap::Args)]
#[command(long_about = r#"
Without arguments, prints this help. With KEY, prints its value; with KEY
and VALUE, stores it. Keys: prefix, path_pattern, default_base,
default_worktree (an empty value clears default_worktree).

The file is $WT_CONFIG/.wt.toml, or ~/.wt.toml when WT_CONFIG is unset.
"#)]
pub struct Args {
    #[arg(help = "Configuration key")]
    pub key: Option<String>,

    #[arg(help = "New value for KEY")]
    pub value: Option<String>,

    #[arg(long, conflicts_with_all = ["key", "edit"], help = "Show all configuration")]
    pub list: bool,

    #[arg(long, conflicts_with = "key", help = "Open the config file in $EDITOR")]
    pub edit: bool,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    // Bound to the repository when there is one, so the file is the same
    // one commands inside the repository read.
    let repo_root = repo::main_worktree_root(&ctx.git, &ctx.cwd).ok();
    let mut config = Config::load(repo_root.as_deref())?;

    if args.edit {
        return edit(&config);
    }

    if args.list {
        ctx.output
            .info(&format!("Config file: {}", config.path().display()));
        for (key, value) in config.entries() {
            let value = value.unwrap_or_else(|| "(unset)".to_string());
            print_line(&mut ctx.output, &format!("{key} = {value}"));
        }
        return Ok(crate::EXIT_SUCCESS);
    }

    match (args.key, args.value) {
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            config.save()?;
            ctx.output.success(&format!("Set config: {key} = {value}"));
            ctx.output
                .info(&format!("Saved to {}", config.path().display()));
        }
        (Some(key), None) => {
            if let Some(value) = config.get(&key)? {
                print_line(&mut ctx.output, &value);
            }
        }
        _ => {
            let mut cmd = super::Cli::command();
            if let Some(sub) = cmd.find_subcommand_mut("config") {
                ctx.output.raw(&format!("{}\n", sub.render_help()));
            }
        }
    }

    Ok(crate::EXIT_SUCCESS)
}

fn edit(config: &Config) -> Result<i32> {
    let path = config.path();
    if !path.exists() {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        fs::write(path, "")
            .with_context(|| format!("Failed to create {}", path.display()))?;
    }

    let editor = std::env::var("EDITOR")
        .ok()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or_else(|| "vi".to_string());

    // $EDITOR may carry arguments ("code --wait").
    let status = Command::new("sh")
        .arg("-c")
        .arg(format!("{editor} \"$1\""))
        .arg("sh")
        .arg(path)
        .status()
        .with_context(|| format!("Failed to start editor '{editor}'"))?;

    Ok(status.code().unwrap_or(crate::EXIT_ERROR))
}
