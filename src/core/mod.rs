//! Core business logic abstractions.
//!
//! Core operations never touch the terminal. They report progress through
//! [`ProgressSink`] and ask the user questions through [`Prompter`], so the
//! same logic runs under the CLI, in tests, or non-interactively.

mod progress;
pub mod repo;
pub mod worktree;

pub use progress::{prompts_disabled, OutputSink, NO_PROMPT_ENV};

// ─────────────────────────────────────────────────────────────────────────
// Progress reporting
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations to report progress without depending on `Output`.
pub trait ProgressSink {
    /// Report an intermediate step (shown in verbose mode).
    fn on_step(&mut self, msg: &str);

    /// Report a warning (always shown).
    fn on_warning(&mut self, msg: &str);

    /// Report a debug message (shown in verbose mode).
    fn on_debug(&mut self, msg: &str);
}

// ─────────────────────────────────────────────────────────────────────────
// Confirmation prompts
// ─────────────────────────────────────────────────────────────────────────

/// Trait for core operations that need a yes/no answer before destroying
/// something (deleting a worktree with unpushed commits, batch cleanup).
pub trait Prompter {
    /// Ask `message`. `default` is the answer when the user just presses
    /// enter or prompting is disabled.
    fn confirm(&mut self, message: &str, default: bool) -> bool;
}

/// A sink that discards all progress messages and answers every prompt
/// with its default.
///
/// Useful for tests and contexts where no output is desired.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn on_step(&mut self, _msg: &str) {}
    fn on_warning(&mut self, _msg: &str) {}
    fn on_debug(&mut self, _msg: &str) {}
}

impl Prompter for NullSink {
    fn confirm(&mut self, _message: &str, default: bool) -> bool {
        default
    }
}
