//! Adapters bridging core traits to the command layer.

use super::{ProgressSink, Prompter};
use crate::output::Output;
use dialoguer::Confirm;

/// Set to `1` to answer every prompt with its default (for scripting).
pub const NO_PROMPT_ENV: &str = "WT_NO_PROMPT";

pub fn prompts_disabled() -> bool {
    std::env::var(NO_PROMPT_ENV).is_ok_and(|v| v == "1")
}

/// Adapter that forwards `ProgressSink` calls to an `Output` implementation
/// and asks confirmations on the terminal.
///
/// # Example
///
/// ```ignore
/// let mut output = CliOutput::new(config);
/// let mut sink = OutputSink(&mut output);
/// manager.delete(&name, force, keep_branch, &mut sink)?;
/// ```
pub struct OutputSink<'a>(pub &'a mut dyn Output);

impl ProgressSink for OutputSink<'_> {
    fn on_step(&mut self, msg: &str) {
        self.0.step(msg);
    }

    fn on_warning(&mut self, msg: &str) {
        self.0.warning(msg);
    }

    fn on_debug(&mut self, msg: &str) {
        self.0.debug(msg);
    }
}

impl Prompter for OutputSink<'_> {
    fn confirm(&mut self, message: &str, default: bool) -> bool {
        if prompts_disabled() {
            return default;
        }

        // No terminal (or ^C/EOF) reads as "no".
        Confirm::new()
            .with_prompt(message)
            .default(default)
            .interact_opt()
            .ok()
            .flatten()
            .unwrap_or(false)
    }
}
