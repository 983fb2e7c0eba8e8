//! cli::commands::list
//!
//! The `list` command: assigned and watched tickets in one table.

use tokio::runtime::Runtime;

use crate::core::App;
use crate::model::Ticket;
use crate::ui::{output, table};
use crate::vtiger::helpdesk::assigned_tickets;

/// List open tickets assigned to the session user plus watched tickets.
///
/// Watched tickets are force-included in the query even when closed or
/// assigned to someone else; the marker column tells the two cases apart.
pub fn list(app: &mut App, rt: &Runtime) {
    let watched = match &app.state {
        Some(state) => match state.watched() {
            Ok(list) => list,
            Err(e) => {
                output::warn(format!("could not read watch list: {}", e), app.verbosity);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    let tickets = match rt.block_on(assigned_tickets(app, &watched)) {
        Ok(tickets) => tickets,
        Err(e) => {
            output::error(e);
            return;
        }
    };

    if tickets.is_empty() {
        output::print("No tickets.", app.verbosity);
        return;
    }

    let user_id = app.client.user_id().unwrap_or_default().to_string();
    let rows: Vec<Vec<String>> = tickets
        .iter()
        .map(|t| {
            vec![
                marker(t, &user_id).to_string(),
                t.number().to_string(),
                t.priority().to_string(),
                t.status().to_string(),
                t.due_date().to_string(),
                t.hours().to_string(),
                t.account_name().to_string(),
                table::clip(t.title()),
            ]
        })
        .collect();

    output::print(
        table::listing(
            &[" ", "Ticket", "Pri", "Status", "Due", "LOE", "Account", "Title"],
            &rows,
        ),
        app.verbosity,
    );

    if tickets.iter().any(Ticket::is_watched) {
        output::print(
            "* = watched, ! = watched and not currently assigned",
            app.verbosity,
        );
    }
}

/// The watch marker for one listing row.
fn marker(ticket: &Ticket, user_id: &str) -> &'static str {
    if !ticket.is_watched() {
        return " ";
    }
    if ticket.assigned_user_id() == user_id && ticket.status() != "Closed" {
        "*"
    } else {
        "!"
    }
}
