//! Process-wide diagnostic logging.
//!
//! Everything here goes to stderr: stdout is reserved for command results
//! and for the path consumed by the shell wrapper (`wt switch --shell-helper`).

use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

/// Overrides the level chosen from command-line flags (`debug`, `info`, ...).
pub const LOG_ENV: &str = "WT_LOG";

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

impl LogLevel {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Self::Debug
        } else if quiet {
            Self::Error
        } else {
            Self::Info
        }
    }
}

pub fn init_logging(verbose: bool, quiet: bool) {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| LogLevel::parse(&v))
        .unwrap_or_else(|| LogLevel::from_flags(verbose, quiet));
    LOG_LEVEL.set(level).ok(); // Ignore errors if already set
}

pub fn get_log_level() -> LogLevel {
    *LOG_LEVEL.get().unwrap_or(&LogLevel::Info)
}

pub fn log(level: LogLevel, message: &str) {
    if level <= get_log_level() {
        match level {
            LogLevel::Error => eprintln!("error: {message}"),
            LogLevel::Warning => eprintln!("warning: {message}"),
            LogLevel::Info => eprintln!("{message}"),
            LogLevel::Debug => eprintln!("debug: {message}"),
        }
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Warning, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
