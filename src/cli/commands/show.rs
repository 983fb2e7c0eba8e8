//! cli::commands::show
//!
//! The `show` command: render one ticket as a detail table.

use tokio::runtime::Runtime;

use crate::core::App;
use crate::model::Ticket;
use crate::ui::output::Verbosity;
use crate::ui::{output, table};
use crate::vtiger::helpdesk::lookup_ticket;

/// Look up a ticket and print its detail view.
pub fn show(app: &mut App, rt: &Runtime, ticket: Option<&str>) {
    let Some(input) = super::resolve_target(app, ticket) else {
        super::no_target(app);
        return;
    };

    match rt.block_on(lookup_ticket(app, &input, false)) {
        Ok(ticket) => print_ticket(&ticket, app.verbosity),
        Err(e) => output::error(e),
    }
}

/// Render the standard ticket detail table.
///
/// Shared with `status` and `time`, which both show the ticket before
/// acting on it.
pub fn print_ticket(ticket: &Ticket, verbosity: Verbosity) {
    let watched = if ticket.is_watched() { " (watched)" } else { "" };
    let rows = [
        ("Ticket #", format!("{}{}", ticket.number(), watched)),
        ("Account", ticket.account_name().to_string()),
        ("Title", table::clip(ticket.title())),
        ("Status", ticket.status().to_string()),
        ("Type", ticket.ticket_type().to_string()),
        ("Severity", ticket.severity().to_string()),
        ("Billable", ticket.billing_type().to_string()),
        ("Priority", ticket.priority().to_string()),
        ("Due Date", ticket.due_date().to_string()),
        ("LOE (hrs)", ticket.hours().to_string()),
    ];
    output::print(table::detail(&rows), verbosity);
}
