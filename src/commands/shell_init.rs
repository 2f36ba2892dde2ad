//! Shell wrapper that lets `wt switch` change the caller's directory.
//!
//! The wrapper runs `wt switch ... --shell-helper`, which prints only the
//! target path on stdout, and `cd`s there when the command succeeded.

use super::{print_line, Context};
use anyhow::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShellKind {
    Bash,
    Zsh,
    Fish,
}

#[derive(clap::Args)]
#[command(long_about = r#"
Prints the shell function to add to your shell startup file:

  bash:  eval "$(wt shell-init bash)"   in ~/.bashrc
  zsh:   eval "$(wt shell-init zsh)"    in ~/.zshrc
  fish:  wt shell-init fish | source    in ~/.config/fish/config.fish
"#)]
pub struct Args {
    #[arg(value_enum, help = "Shell to generate the wrapper for")]
    pub shell: ShellKind,
}

const POSIX_WRAPPER: &str = r#"# wt shell integration for {shell}
wt() {
    if [ "$1" = "switch" ]; then
        local target
        target="$(command wt "$@" --shell-helper)" || return $?
        if [ -n "$target" ] && [ -d "$target" ]; then
            cd "$target" || return 1
        elif [ -n "$target" ]; then
            printf '%s\n' "$target"
        fi
    else
        command wt "$@"
    fi
}"#;

const FISH_WRAPPER: &str = r#"# wt shell integration for fish
function wt
    if test "$argv[1]" = "switch"
        set -l target (command wt $argv --shell-helper)
        or return $status
        if test -n "$target" -a -d "$target"
            cd "$target"; or return 1
        else if test -n "$target"
            printf '%s\n' $target
        end
    else
        command wt $argv
    end
end"#;

pub fn wrapper(shell: ShellKind) -> String {
    match shell {
        ShellKind::Bash => POSIX_WRAPPER.replace("{shell}", "bash"),
        ShellKind::Zsh => POSIX_WRAPPER.replace("{shell}", "zsh"),
        ShellKind::Fish => FISH_WRAPPER.to_string(),
    }
}

pub fn run(args: Args, ctx: &mut Context) -> Result<i32> {
    print_line(&mut ctx.output, &wrapper(args.shell));
    Ok(crate::EXIT_SUCCESS)
}
