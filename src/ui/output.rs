//! ui::output
//!
//! Console output helpers gated by a process-wide verbosity, picked once
//! from the `-q`/`-d` flags at startup.
//!
//! Tables and messages go to stdout; warnings, errors, and debug traces
//! go to stderr so piped stdout stays clean.

use std::fmt::Display;

/// How much the process prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Errors only (`-q`).
    Quiet,
    Normal,
    /// Everything, including request and response traces (`-d`).
    Debug,
}

impl Verbosity {
    /// Quiet wins when both flags are set.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// A normal message; suppressed by `-q`.
pub fn print(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// A trace line on stderr; only shown with `-d`.
pub fn debug(message: impl Display, verbosity: Verbosity) {
    if verbosity == Verbosity::Debug {
        eprintln!("[debug] {}", message);
    }
}

/// Errors always print, regardless of verbosity.
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// A warning on stderr; suppressed by `-q`.
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}
