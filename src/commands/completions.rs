use super::Cli;
use anyhow::Result;
use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io;

#[derive(clap::Args)]
pub struct Args {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

pub fn run(args: Args) -> Result<i32> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "wt", &mut io::stdout());
    Ok(crate::EXIT_SUCCESS)
}
