//! ui::prompts
//!
//! Interactive prompts: free text, masked secrets, confirmations, and
//! numbered choice lists.
//!
//! # Design
//!
//! These are blocking, single-threaded reads from stdin. The REPL itself
//! lives in [`crate::cli::repl`] on top of rustyline; the prompts here are
//! for mid-command questions (login credentials, status choice,
//! time-entry confirmation) where history and completion are unwanted.

use std::io::{self, BufRead, Write};

use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt cancelled by user")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Prompt for a line of text input. The result is trimmed.
pub fn input(message: &str) -> Result<String, PromptError> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    let n = io::stdin().lock().read_line(&mut line)?;
    if n == 0 {
        // EOF (ctrl-d)
        return Err(PromptError::Cancelled);
    }
    Ok(line.trim().to_string())
}

/// Prompt for masked input (access keys). The input is not echoed.
pub fn password(message: &str) -> Result<String, PromptError> {
    let secret = rpassword::prompt_password(message)?;
    Ok(secret.trim().to_string())
}

/// Prompt for a yes/no confirmation. Empty input means no.
pub fn confirm(message: &str) -> Result<bool, PromptError> {
    let answer = input(&format!("{} [y/N] ", message))?;
    Ok(matches!(answer.as_str(), "y" | "Y" | "yes" | "Yes"))
}

/// Prompt to select from a numbered list of options.
///
/// Returns the zero-based index of the selection, or `None` when the user
/// enters nothing or an out-of-range value.
pub fn choice<T: AsRef<str>>(message: &str, options: &[T]) -> Result<Option<usize>, PromptError> {
    println!("{}", message);
    for (i, opt) in options.iter().enumerate() {
        println!("  {:2}) {}", i, opt.as_ref());
    }

    let answer = input("choice: ")?;
    match answer.parse::<usize>() {
        Ok(idx) if idx < options.len() => Ok(Some(idx)),
        _ => Ok(None),
    }
}
