//! cli::commands
//!
//! REPL command dispatch and per-command usage text.
//!
//! Each handler validates its arguments, calls the relevant operation,
//! and renders the result; remote failures are printed, never retried.
//! Handlers that need the network run it through the shared
//! current-thread runtime (`rt.block_on`).

mod debug;
mod list;
mod login;
mod select;
mod show;
mod status;
mod time;
mod watch;

pub use list::list;
pub use login::login;
pub use select::select;
pub use show::show;
pub use status::status;
pub use time::time;
pub use watch::{unwatch, watch};

use anyhow::Result;
use tokio::runtime::Runtime;

use crate::core::App;
use crate::ui::output;

/// Whether the REPL should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Quit,
}

/// Resolve a ticket argument, honoring `-` and the selected ticket.
///
/// `None` or `-` falls back to the selection made with `set`. Returns
/// `None` only when there is nothing to fall back to.
fn resolve_target(app: &App, arg: Option<&str>) -> Option<String> {
    match arg {
        Some("-") | None => app.selected_ticket().map(str::to_string),
        Some(other) => Some(other.to_string()),
    }
}

fn no_target(app: &App) {
    output::print(
        "no ticket given and none selected; pass a ticket number or use 'set'",
        app.verbosity,
    );
}

/// Canonical command names and their aliases.
fn resolve_alias(command: &str) -> &str {
    match command {
        "bye" | "exit" | "q" => "quit",
        "?" => "help",
        other => other,
    }
}

/// Dispatch one input line to its handler.
pub fn dispatch(app: &mut App, rt: &Runtime, line: &str) -> Result<ControlFlow> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match resolve_alias(command) {
        "quit" => return Ok(ControlFlow::Quit),
        "help" => help(args.first().copied(), app.verbosity),
        "login" => login(app, rt, args.first().copied() == Some("force"))?,
        "show" => show(app, rt, args.first().copied()),
        "list" => list(app, rt),
        "status" => status(app, rt, args.first().copied(), args.get(1).copied())?,
        "time" => time(app, rt, &args)?,
        "watch" => watch(app, rt, args.first().copied()),
        "unwatch" => unwatch(app, args.first().copied()),
        "set" => select(app, args.first().copied()),
        "debug_listtypes" => debug::listtypes(app, rt),
        "debug_describe" => debug::describe(app, rt, args.first().copied()),
        unknown => output::print(
            format!("unknown command '{}'; try 'help'", unknown),
            app.verbosity,
        ),
    }

    Ok(ControlFlow::Continue)
}

/// Commands in help-listing order.
const COMMANDS: &[&str] = &[
    "login", "show", "list", "status", "time", "watch", "unwatch", "set", "help", "quit",
];

/// One-line summary plus argument detail for a command.
pub fn usage(command: &str) -> &'static str {
    match command {
        "login" => "Login to vTiger\n  Usage: login [force]\n  force - re-prompt for credentials even when configured",
        "show" => "Lookup basic information about a ticket\n  Usage: show [<ticket number>]\n  Uses the selected ticket when no number is given (see 'set')",
        "list" => "Show currently assigned and watched tickets\n  Usage: list",
        "status" => "Change the status of a ticket\n  Usage: status [<ticket number> | -] [<choice index> | <status name> | <alias>]\n  With no choice, a selection list is prompted. Status names use\n  underscores for spaces. Aliases: assigned, hold, qa, rework, rw,\n  closed, ip, now",
        "time" => "Create a time entry against a ticket\n  Usage: time [<ticket number> | -] <time> [<date>]\n  <time> without a decimal point is minutes; with one it is hours\n  (2.5 = 2 hours 30 minutes). <date> is YYYY-MM-DD or YYYYMMDD and\n  defaults to today",
        "watch" => "Add a ticket to your watch list; it stays in 'list' until unwatched\n  Usage: watch [<ticket number>]",
        "unwatch" => "Remove a ticket from your watch list\n  Usage: unwatch [<ticket number>]",
        "set" => "Set or clear the ticket targeted by '-' or omitted arguments\n  Usage: set [<ticket number>]",
        "help" => "Show available commands\n  Usage: help [<command>]",
        "quit" => "Quit vtix",
        _ => "Command not found.",
    }
}

fn help(command: Option<&str>, verbosity: crate::ui::output::Verbosity) {
    match command {
        Some(cmd) => output::print(usage(resolve_alias(cmd)), verbosity),
        None => {
            output::print("Available commands:\n", verbosity);
            for cmd in COMMANDS {
                output::print(format!("{}\n", usage(cmd)), verbosity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve() {
        assert_eq!(resolve_alias("q"), "quit");
        assert_eq!(resolve_alias("bye"), "quit");
        assert_eq!(resolve_alias("exit"), "quit");
        assert_eq!(resolve_alias("?"), "help");
        assert_eq!(resolve_alias("list"), "list");
    }

    #[test]
    fn every_listed_command_has_usage() {
        for cmd in COMMANDS {
            assert_ne!(usage(cmd), "Command not found.", "missing usage for {}", cmd);
        }
    }
}
