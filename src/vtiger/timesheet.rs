//! vtiger::timesheet
//!
//! Time-entry creation against the Timesheet module.
//!
//! Required parameters for a Timesheet create:
//! - `tsreltoid` - webservice id of the related HelpDesk object
//! - `tsconcept` - entry category
//! - `assigned_user_id` - the logging user
//! - `start` / `end` - `YYYY-MM-DD HH:MM:SS`
//! - `totaltime` - `HH:MM:SS` duration between start and end (the service
//!   wants it spelled out even though it is derivable)

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde_json::json;

use super::helpdesk::{lookup_ticket, HelpdeskError};
use super::Method;
use crate::core::App;
use crate::ui::output;

/// Entries always start at 9 AM on the given date.
const WORKDAY_START_HOUR: u32 = 9;

/// Category label attached to every entry this client creates.
const ENTRY_CONCEPT: &str = "Other";

/// Timestamp format the Timesheet module expects.
const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What was logged, for reporting back to the user.
#[derive(Debug, Clone)]
pub struct TimeEntryReceipt {
    pub ticket_number: String,
    /// `HH:MM:00` duration string as sent to the service.
    pub duration: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Create a time entry of `total_minutes` against a ticket on `date`.
///
/// The duration is validated before anything goes over the wire: it must
/// be positive and representable as an end timestamp on the given date.
/// Looks the ticket up (propagating `TicketNotFound`), then issues a
/// single `create`; there is no retry. On success the entry is also
/// recorded in the local store when storage is enabled.
pub async fn create_time_entry(
    app: &mut App,
    ticket_input: &str,
    total_minutes: i64,
    date: NaiveDate,
) -> Result<TimeEntryReceipt, HelpdeskError> {
    let offset = Duration::try_minutes(total_minutes)
        .filter(|_| total_minutes > 0)
        .ok_or(HelpdeskError::InvalidDuration {
            minutes: total_minutes,
        })?;

    let ticket = lookup_ticket(app, ticket_input, false).await?;

    let start = date
        .and_hms_opt(WORKDAY_START_HOUR, 0, 0)
        .expect("09:00:00 is a valid time of day");
    let end = start
        .checked_add_signed(offset)
        .ok_or(HelpdeskError::InvalidDuration {
            minutes: total_minutes,
        })?;
    let duration = format_duration(total_minutes);

    let user_id = app.client.user_id().unwrap_or_default().to_string();
    let element = json!({
        "tsreltoid": ticket.id(),
        "tsconcept": ENTRY_CONCEPT,
        "assigned_user_id": user_id,
        "start": start.format(TS_FORMAT).to_string(),
        "end": end.format(TS_FORMAT).to_string(),
        "totaltime": duration,
    })
    .to_string();

    let response = app
        .client
        .execute(
            &[
                ("operation", "create"),
                ("element", &element),
                ("elementType", "Timesheet"),
            ],
            Method::Post,
        )
        .await?;
    if !response.success {
        return Err(response.rejection("create").into());
    }

    if let Some(state) = &app.state {
        if let Err(e) = state.record_time_entry(
            ticket.number(),
            &start.format(TS_FORMAT).to_string(),
            &end.format(TS_FORMAT).to_string(),
            true,
        ) {
            output::warn(
                format!("time entry sent but not recorded locally: {}", e),
                app.verbosity,
            );
        }
    }

    Ok(TimeEntryReceipt {
        ticket_number: ticket.number().to_string(),
        duration,
        start,
        end,
    })
}

/// Render a minute count as the `HH:MM:00` string the service expects.
fn format_duration(total_minutes: i64) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    format!("{:02}:{:02}:00", hours, minutes)
}
