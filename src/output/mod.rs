//! Output abstraction for the command layer.
//!
//! Commands write through `&mut dyn Output` instead of calling `println!`
//! directly, so tests can capture what a command said:
//!
//! ```ignore
//! pub fn run_with_output(args: Args, output: &mut dyn Output) -> Result<()> {
//!     output.step("Removing worktree...");
//!     output.success("Deleted worktree 'foo'");
//!     Ok(())
//! }
//! ```
//!
//! Command results go to stdout. Steps, debug lines, warnings and errors
//! go to stderr, which keeps stdout usable by `wt switch --shell-helper`.

mod cli;

pub use cli::CliOutput;
pub use test::{OutputEntry, TestOutput};

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Suppress everything except warnings, errors and raw output.
    pub quiet: bool,
    /// Show steps and debug messages.
    pub verbose: bool,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self { quiet, verbose }
    }
}

/// Sink for everything a command tells the user.
pub trait Output {
    /// Informational message. Respects quiet mode.
    fn info(&mut self, msg: &str);

    /// Success message. Respects quiet mode.
    fn success(&mut self, msg: &str);

    /// Warning on stderr, shown even in quiet mode.
    fn warning(&mut self, msg: &str);

    /// Error on stderr, shown even in quiet mode.
    fn error(&mut self, msg: &str);

    /// Verbose-only diagnostic.
    fn debug(&mut self, msg: &str);

    /// Intermediate step of an operation. Verbose only.
    fn step(&mut self, msg: &str);

    /// The one or two line summary a command ends with.
    fn result(&mut self, msg: &str);

    /// `  key: value` detail line.
    fn detail(&mut self, key: &str, value: &str);

    /// ` - item` list line.
    fn list_item(&mut self, item: &str);

    /// Unformatted content, written even in quiet mode (tables, JSON,
    /// paths for the shell wrapper).
    fn raw(&mut self, content: &str);

    fn is_quiet(&self) -> bool;

    fn is_verbose(&self) -> bool;
}
