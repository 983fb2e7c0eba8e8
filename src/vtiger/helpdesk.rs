//! vtiger::helpdesk
//!
//! Ticket operations against the HelpDesk module: lookup by number, the
//! assigned-ticket listing, the status picklist, and status updates.
//!
//! Every operation takes the [`App`] context explicitly; the account
//! cache and watch-list enrichment flow through it.

use serde_json::Value;

use super::accounts::lookup_account;
use super::{Method, VtigerError};
use crate::core::numbers::{normalize_ticket_number, InvalidTicketNumber};
use crate::core::App;
use crate::model::ticket::CF_PRIORITY;
use crate::model::Ticket;
use crate::ui::output;

/// Errors from ticket operations.
#[derive(Debug, thiserror::Error)]
pub enum HelpdeskError {
    /// The user-supplied ticket number does not normalize.
    #[error(transparent)]
    InvalidTicketNumber(#[from] InvalidTicketNumber),

    /// A well-formed number matched zero tickets.
    #[error("ticket {number} was not found")]
    TicketNotFound { number: String },

    /// A time-entry duration that cannot be represented as one entry.
    #[error("cannot log {minutes} minutes as one time entry")]
    InvalidDuration { minutes: i64 },

    /// The underlying request failed.
    #[error(transparent)]
    Request(#[from] VtigerError),
}

/// Look up a single ticket by its (raw) number.
///
/// `complete` fetches every field rather than the display projection;
/// update operations require a complete record.
///
/// The watched flag is read fresh from the local store on every lookup,
/// and the owning account is resolved with a placeholder fallback -
/// account failures never fail the ticket fetch.
pub async fn lookup_ticket(
    app: &mut App,
    input: &str,
    complete: bool,
) -> Result<Ticket, HelpdeskError> {
    let number = normalize_ticket_number(input)?;
    output::debug(format!("looking up ticket {}", number), app.verbosity);

    let query = format!(
        "SELECT {} FROM HelpDesk WHERE ticket_no = '{}';",
        Ticket::query_fields(complete),
        number
    );
    let response = app
        .client
        .execute(&[("operation", "query"), ("query", &query)], Method::Get)
        .await?;

    if !response.success || response.rows().is_empty() {
        return Err(HelpdeskError::TicketNotFound { number });
    }
    if response.rows().len() > 1 {
        // The service does not document any ordering here; the first row
        // is an arbitrary match, not the most recent.
        output::warn(
            format!("more than one ticket matched {}; using the first", number),
            app.verbosity,
        );
    }

    let ticket = Ticket::from_row(&response.rows()[0]);
    Ok(enrich(app, ticket).await)
}

/// List open tickets assigned to the session user, force-including the
/// named extra ticket numbers (watched tickets that may be closed or
/// assigned elsewhere). Ordered by priority, then ticket number.
///
/// An empty vec is a valid outcome, distinct from a request failure.
pub async fn assigned_tickets(
    app: &mut App,
    extra_numbers: &[String],
) -> Result<Vec<Ticket>, HelpdeskError> {
    let user_id = app.client.user_id().unwrap_or_default().to_string();

    let mut query = format!(
        "SELECT {} FROM HelpDesk WHERE assigned_user_id = '{}' AND ticketstatus != 'Closed'",
        Ticket::query_fields(false),
        user_id
    );
    for number in extra_numbers {
        query.push_str(&format!(" OR ticket_no = '{}'", number));
    }
    query.push_str(&format!(" ORDER BY {}, ticket_no;", CF_PRIORITY));

    let response = app
        .client
        .execute(&[("operation", "query"), ("query", &query)], Method::Get)
        .await?;
    if !response.success {
        return Err(response.rejection("query").into());
    }

    let rows: Vec<Value> = response.rows().to_vec();
    let mut tickets = Vec::with_capacity(rows.len());
    for row in &rows {
        let ticket = Ticket::from_row(row);
        tickets.push(enrich(app, ticket).await);
    }
    Ok(tickets)
}

/// The available ticket statuses, in server-declared picklist order.
///
/// This order is authoritative for status selection by index.
pub async fn ticket_statuses(app: &mut App) -> Result<Vec<String>, HelpdeskError> {
    let response = app
        .client
        .execute(
            &[("operation", "describe"), ("elementType", "HelpDesk")],
            Method::Get,
        )
        .await?;
    if !response.success {
        return Err(response.rejection("describe").into());
    }

    let fields = response
        .result
        .get("fields")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            VtigerError::InvalidResponse("describe response missing fields".to_string())
        })?;

    for field in fields {
        if field.get("name").and_then(Value::as_str) != Some("ticketstatus") {
            continue;
        }
        let labels = field
            .get("type")
            .and_then(|t| t.get("picklistValues"))
            .and_then(Value::as_array)
            .ok_or_else(|| {
                VtigerError::InvalidResponse(
                    "ticketstatus field carries no picklist".to_string(),
                )
            })?
            .iter()
            .filter_map(|v| v.get("label").and_then(Value::as_str))
            .map(str::to_string)
            .collect();
        return Ok(labels);
    }

    Err(VtigerError::InvalidResponse("no ticketstatus field in describe response".to_string())
        .into())
}

/// Set a ticket's status and push the update.
///
/// The service requires the complete record on update, so the ticket's
/// full field map is serialized back, not a partial patch. Returns the
/// remote success indicator.
pub async fn set_ticket_status(
    app: &mut App,
    ticket: &mut Ticket,
    status: &str,
) -> Result<bool, HelpdeskError> {
    ticket.set_status(status);

    let element = Value::Object(
        ticket
            .ws_object()
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect(),
    )
    .to_string();

    let response = app
        .client
        .execute(
            &[
                ("operation", "update"),
                ("element", &element),
                ("elementType", "HelpDesk"),
            ],
            Method::Post,
        )
        .await?;

    Ok(response.success)
}

/// Attach the watched flag and the resolved account to a freshly fetched
/// ticket.
async fn enrich(app: &mut App, mut ticket: Ticket) -> Ticket {
    if let Some(state) = &app.state {
        match state.is_watching(ticket.number()) {
            Ok(watched) => ticket.set_watched(watched),
            Err(e) => output::warn(
                format!("could not read watch list: {}", e),
                app.verbosity,
            ),
        }
    }

    let account_id = ticket.account_id().to_string();
    let account = lookup_account(app, &account_id).await;
    ticket.set_account(account);
    ticket
}
