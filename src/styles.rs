//! Terminal text styling.
//!
//! Escape codes stay in this module; callers ask [`colors_enabled`] (or the
//! stderr variant) before using them.

use std::io::IsTerminal;

pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";
pub const RESET: &str = "\x1b[0m";

fn no_color() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

/// Colours on stdout: only on a terminal and when `NO_COLOR` is unset.
pub fn colors_enabled() -> bool {
    !no_color() && std::io::stdout().is_terminal()
}

pub fn colors_enabled_stderr() -> bool {
    !no_color() && std::io::stderr().is_terminal()
}

/// Wrap `text` in `style` when `enabled`.
pub fn paint(style: &str, text: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{text}{RESET}")
    } else {
        text.to_string()
    }
}

pub fn bold(text: &str) -> String {
    format!("{BOLD}{text}{RESET}")
}
