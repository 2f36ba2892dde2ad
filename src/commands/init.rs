use super::Context;
use crate::config::{defaults, keys, Config};
use crate::output::Output;
use anyhow::Result;

#[derive(clap::Args)]
#[command(long_about = r#"
Writes the configuration file with the given branch prefix, path pattern
and default base. The pattern may use {repo}, {name} and {branch} and is
resolved relative to the repository root.

The configuration applies to every repository.
"#)]
pub struct Args {
    #[arg(long, default_value = defaults::PREFIX, help = "Branch prefix for new worktrees")]
    pub prefix: String,

    #[arg(
        long = "path",
        default_value = defaults::PATH_PATTERN,
        help = "Path pattern for worktree directories"
    )]
    pub path_pattern: String,

    #[arg(long, default_value = defaults::DEFAULT_BASE, help = "Base ref for new branches")]
    pub base: String,
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    let mut config = Config::load(None)?;
    config.set(keys::PREFIX, &args.prefix)?;
    config.set(keys::PATH_PATTERN, &args.path_pattern)?;
    config.set(keys::DEFAULT_BASE, &args.base)?;
    config.set(keys::DEFAULT_WORKTREE, "")?;
    config.save()?;

    let output = &mut ctx.output;
    output.success(&format!(
        "Configuration saved to {}",
        config.path().display()
    ));
    output.detail("Branch prefix", config.prefix());
    output.detail("Path pattern", config.path_pattern());
    output.detail("Default base", config.default_base());
    Ok(crate::EXIT_SUCCESS)
}
