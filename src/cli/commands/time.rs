//! cli::commands::time
//!
//! The `time` command: log a time entry against a ticket.
//!
//! The time argument is minutes when whole (`30`) and hours when it
//! carries a decimal point (`2.5` = 2 hours 30 minutes). The optional
//! date defaults to today.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tokio::runtime::Runtime;

use super::show::print_ticket;
use crate::core::App;
use crate::ui::{output, prompts};
use crate::vtiger::helpdesk::lookup_ticket;
use crate::vtiger::timesheet::create_time_entry;

/// Create a time entry. Arguments: `[<ticket number> | -] <time> [<date>]`.
pub fn time(app: &mut App, rt: &Runtime, args: &[&str]) -> Result<()> {
    let Some((ticket_arg, time_arg, date_arg)) = split_args(args) else {
        output::print(super::usage("time"), app.verbosity);
        return Ok(());
    };

    let Some(input) = super::resolve_target(app, ticket_arg) else {
        super::no_target(app);
        return Ok(());
    };
    let Some(minutes) = parse_minutes(time_arg) else {
        output::print(
            format!("'{}' is not a usable amount of time", time_arg),
            app.verbosity,
        );
        return Ok(());
    };
    let Some(date) = parse_entry_date(date_arg) else {
        output::print(
            format!(
                "'{}' is not a usable date; use YYYY-MM-DD or YYYYMMDD",
                date_arg.unwrap_or_default()
            ),
            app.verbosity,
        );
        return Ok(());
    };

    // Show the ticket before asking, so the user confirms against the
    // right one.
    match rt.block_on(lookup_ticket(app, &input, false)) {
        Ok(ticket) => print_ticket(&ticket, app.verbosity),
        Err(e) => {
            output::error(e);
            return Ok(());
        }
    }

    let question = format!(
        "You are about to log {} minutes on {} against the above ticket. Ok?",
        minutes, date
    );
    if !prompts::confirm(&question)? {
        output::print("nothing logged", app.verbosity);
        return Ok(());
    }

    match rt.block_on(create_time_entry(app, &input, minutes, date)) {
        Ok(receipt) => output::print(
            format!(
                "{} has been logged against ticket {} starting at {}",
                receipt.duration,
                receipt.ticket_number,
                receipt.start.format("%Y-%m-%d %H:%M:%S")
            ),
            app.verbosity,
        ),
        Err(e) => output::error(e),
    }
    Ok(())
}

/// Split raw arguments into (ticket, time, date).
///
/// The ticket argument may be omitted entirely when a ticket is selected;
/// it is recognized by the second argument parsing as a time value.
fn split_args<'a>(args: &[&'a str]) -> Option<(Option<&'a str>, &'a str, Option<&'a str>)> {
    match args {
        [time] => Some((None, time, None)),
        [a, b] if parse_minutes(b).is_some() => Some((Some(a), b, None)),
        [time, date] => Some((None, time, Some(date))),
        [ticket, time, date] => Some((Some(ticket), time, Some(date))),
        _ => None,
    }
}

/// Longest entry accepted in one command: a full day.
const MAX_ENTRY_MINUTES: i64 = 24 * 60;

/// Parse the time argument into whole minutes.
///
/// A value containing `.` is hours and is rounded to the nearest minute;
/// anything else is minutes. Zero, negative, and over-a-day amounts are
/// rejected.
fn parse_minutes(arg: &str) -> Option<i64> {
    let minutes = if arg.contains('.') {
        let hours: f64 = arg.parse().ok()?;
        if !hours.is_finite() {
            return None;
        }
        (hours * 60.0).round() as i64
    } else {
        arg.parse().ok()?
    };
    (minutes > 0 && minutes <= MAX_ENTRY_MINUTES).then_some(minutes)
}

/// Parse the optional date argument; absent means today.
fn parse_entry_date(arg: Option<&str>) -> Option<NaiveDate> {
    match arg {
        None => Some(Local::now().date_naive()),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
            .ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_values_are_minutes() {
        assert_eq!(parse_minutes("30"), Some(30));
        assert_eq!(parse_minutes("90"), Some(90));
    }

    #[test]
    fn decimal_values_are_hours() {
        assert_eq!(parse_minutes("2.5"), Some(150));
        assert_eq!(parse_minutes("0.25"), Some(15));
        assert_eq!(parse_minutes("1.0"), Some(60));
    }

    #[test]
    fn junk_and_nonpositive_amounts_are_rejected() {
        assert_eq!(parse_minutes("abc"), None);
        assert_eq!(parse_minutes("0"), None);
        assert_eq!(parse_minutes("-15"), None);
        assert_eq!(parse_minutes("-0.5"), None);
    }

    #[test]
    fn amounts_over_a_day_are_rejected() {
        // These previously saturated into values chrono cannot represent.
        assert_eq!(parse_minutes("9223372036854775807"), None);
        assert_eq!(parse_minutes("153722867280912.9"), None);
        assert_eq!(parse_minutes("1441"), None);
        assert_eq!(parse_minutes("25.0"), None);
        assert_eq!(parse_minutes("1440"), Some(1440));
        assert_eq!(parse_minutes("24.0"), Some(1440));
    }

    #[test]
    fn both_date_spellings_parse() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(parse_entry_date(Some("2024-03-01")), Some(expected));
        assert_eq!(parse_entry_date(Some("20240301")), Some(expected));
        assert_eq!(parse_entry_date(Some("03/01/2024")), None);
    }

    #[test]
    fn missing_date_is_today() {
        assert_eq!(parse_entry_date(None), Some(Local::now().date_naive()));
    }

    #[test]
    fn arguments_split_around_the_time_value() {
        assert_eq!(split_args(&["30"]), Some((None, "30", None)));
        assert_eq!(split_args(&["TT1", "30"]), Some((Some("TT1"), "30", None)));
        assert_eq!(split_args(&["-", "2.5"]), Some((Some("-"), "2.5", None)));
        assert_eq!(
            split_args(&["30", "2024-03-01"]),
            Some((None, "30", Some("2024-03-01")))
        );
        assert_eq!(
            split_args(&["TT1", "30", "20240301"]),
            Some((Some("TT1"), "30", Some("20240301")))
        );
        assert_eq!(split_args(&[]), None);
        assert_eq!(split_args(&["a", "b", "c", "d"]), None);
    }
}
