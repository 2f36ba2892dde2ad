//! Terminal implementation of [`Output`].

use super::{Output, OutputConfig};
use crate::styles::{self, colors_enabled, colors_enabled_stderr, paint};

/// Writes results to stdout and diagnostics to stderr, git style:
/// `warning: ...`, `error: ...`, and verbose-only steps.
#[derive(Debug)]
pub struct CliOutput {
    config: OutputConfig,
}

impl CliOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn default_output() -> Self {
        Self::new(OutputConfig::default())
    }

    pub fn quiet() -> Self {
        Self::new(OutputConfig::new(true, false))
    }

    pub fn verbose() -> Self {
        Self::new(OutputConfig::new(false, true))
    }
}

impl Output for CliOutput {
    fn info(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{msg}");
        }
    }

    fn success(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{}", paint(styles::GREEN, msg, colors_enabled()));
        }
    }

    fn warning(&mut self, msg: &str) {
        eprintln!(
            "{} {msg}",
            paint(styles::YELLOW, "warning:", colors_enabled_stderr())
        );
    }

    fn error(&mut self, msg: &str) {
        eprintln!(
            "{} {msg}",
            paint(styles::RED, "error:", colors_enabled_stderr())
        );
    }

    fn debug(&mut self, msg: &str) {
        if self.config.verbose {
            eprintln!(
                "{}",
                paint(styles::DIM, &format!("debug: {msg}"), colors_enabled_stderr())
            );
        }
    }

    fn step(&mut self, msg: &str) {
        if self.config.verbose && !self.config.quiet {
            eprintln!("{}", paint(styles::DIM, msg, colors_enabled_stderr()));
        }
    }

    fn result(&mut self, msg: &str) {
        if !self.config.quiet {
            println!("{}", paint(styles::BOLD, msg, colors_enabled()));
        }
    }

    fn detail(&mut self, key: &str, value: &str) {
        if !self.config.quiet {
            let key = paint(styles::BOLD, &format!("{key}:"), colors_enabled());
            println!("  {key} {value}");
        }
    }

    fn list_item(&mut self, item: &str) {
        if !self.config.quiet {
            println!(" - {item}");
        }
    }

    fn raw(&mut self, content: &str) {
        print!("{content}");
    }

    fn is_quiet(&self) -> bool {
        self.config.quiet
    }

    fn is_verbose(&self) -> bool {
        self.config.verbose
    }
}
