//! wt - git worktree manager.
use clap::Parser;
use wt::commands::{self, Cli};
use wt::logging::init_logging;
use wt::{exit_code_for, log_error, WtError};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let code = match commands::dispatch(cli) {
        Ok(code) => code,
        Err(err) => {
            // A declined prompt is a normal outcome with its own exit code.
            if !matches!(err.downcast_ref::<WtError>(), Some(WtError::Cancelled)) {
                log_error!("{err:#}");
            }
            exit_code_for(&err)
        }
    };

    std::process::exit(code);
}
