//! cli::commands::watch
//!
//! The `watch` and `unwatch` commands: manage the local watch list.
//!
//! Watching verifies the ticket exists first. Unwatching deliberately
//! does not; a watched ticket that has since been deleted remotely must
//! still be removable.

use tokio::runtime::Runtime;

use super::show::print_ticket;
use crate::core::numbers::normalize_ticket_number;
use crate::core::App;
use crate::state::{UnwatchOutcome, WatchOutcome};
use crate::ui::output;
use crate::vtiger::helpdesk::lookup_ticket;

/// Add a ticket to the watch list.
pub fn watch(app: &mut App, rt: &Runtime, arg: Option<&str>) {
    let Some(input) = super::resolve_target(app, arg) else {
        super::no_target(app);
        return;
    };

    let ticket = match rt.block_on(lookup_ticket(app, &input, false)) {
        Ok(ticket) => ticket,
        Err(e) => {
            output::error(e);
            return;
        }
    };
    print_ticket(&ticket, app.verbosity);

    let Some(state) = &app.state else {
        no_storage(app);
        return;
    };
    match state.watch(ticket.number()) {
        Ok(WatchOutcome::Added) => {
            output::print(format!("now watching {}", ticket.number()), app.verbosity)
        }
        Ok(WatchOutcome::AlreadyWatching) => output::print(
            format!("already watching {}", ticket.number()),
            app.verbosity,
        ),
        Err(e) => output::error(e),
    }
}

/// Remove a ticket from the watch list.
pub fn unwatch(app: &mut App, arg: Option<&str>) {
    let Some(input) = super::resolve_target(app, arg) else {
        super::no_target(app);
        return;
    };
    let number = match normalize_ticket_number(&input) {
        Ok(number) => number,
        Err(e) => {
            output::error(e);
            return;
        }
    };

    let Some(state) = &app.state else {
        no_storage(app);
        return;
    };
    match state.unwatch(&number) {
        Ok(UnwatchOutcome::Removed) => {
            output::print(format!("no longer watching {}", number), app.verbosity)
        }
        Ok(UnwatchOutcome::NotWatching) => {
            output::print(format!("{} was not being watched", number), app.verbosity)
        }
        Err(e) => output::error(e),
    }
}

fn no_storage(app: &App) {
    output::print(
        "local storage is disabled; the watch list is unavailable",
        app.verbosity,
    );
}
