//! cli::commands::status
//!
//! The `status` command: move a ticket through the status picklist.
//!
//! The new status can be given as a zero-based index into the picklist,
//! as the status name with underscores for spaces (`On_Hold`), or as one
//! of a few short aliases. With no argument a numbered prompt is shown.

use anyhow::Result;
use tokio::runtime::Runtime;

use super::show::print_ticket;
use crate::core::App;
use crate::ui::{output, prompts};
use crate::vtiger::helpdesk::{lookup_ticket, set_ticket_status, ticket_statuses};

/// Change the status of a ticket.
pub fn status(
    app: &mut App,
    rt: &Runtime,
    ticket_arg: Option<&str>,
    choice_arg: Option<&str>,
) -> Result<()> {
    let Some(input) = super::resolve_target(app, ticket_arg) else {
        super::no_target(app);
        return Ok(());
    };

    // The update echoes the whole record back, so fetch it complete.
    let mut ticket = match rt.block_on(lookup_ticket(app, &input, true)) {
        Ok(ticket) => ticket,
        Err(e) => {
            output::error(e);
            return Ok(());
        }
    };
    print_ticket(&ticket, app.verbosity);

    let statuses = match rt.block_on(ticket_statuses(app)) {
        Ok(statuses) => statuses,
        Err(e) => {
            output::error(e);
            return Ok(());
        }
    };

    let target = match choice_arg {
        Some(arg) => match resolve_status_choice(arg, &statuses) {
            Some(status) => status,
            None => {
                output::print(
                    format!("'{}' does not name an available status", arg),
                    app.verbosity,
                );
                return Ok(());
            }
        },
        None => match prompts::choice("New status:", &statuses)? {
            Some(idx) => statuses[idx].clone(),
            None => {
                output::print("no change made", app.verbosity);
                return Ok(());
            }
        },
    };

    if ticket.status() == target {
        output::print(
            format!("{} is already in status '{}'", ticket.number(), target),
            app.verbosity,
        );
        return Ok(());
    }

    match rt.block_on(set_ticket_status(app, &mut ticket, &target)) {
        Ok(true) => {
            output::print(
                format!("{} is now '{}'", ticket.number(), target),
                app.verbosity,
            );
        }
        Ok(false) => output::warn("the service rejected the status update", app.verbosity),
        Err(e) => output::error(e),
    }
    Ok(())
}

/// Map a user-supplied status argument onto a picklist entry.
///
/// Accepts a zero-based picklist index, a status name with underscores
/// standing in for spaces (matched case-insensitively), or an alias.
fn resolve_status_choice(arg: &str, statuses: &[String]) -> Option<String> {
    if let Ok(idx) = arg.parse::<usize>() {
        return statuses.get(idx).cloned();
    }

    let candidate = match arg {
        "assigned" => "Assigned".to_string(),
        "hold" => "On Hold".to_string(),
        "qa" => "Awaiting QA".to_string(),
        "rework" | "rw" => "QA Rework".to_string(),
        "closed" => "Closed".to_string(),
        "ip" | "now" => "In Progress".to_string(),
        other => other.replace('_', " "),
    };

    statuses
        .iter()
        .find(|s| s.eq_ignore_ascii_case(&candidate))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picklist() -> Vec<String> {
        [
            "Open",
            "Assigned",
            "In Progress",
            "On Hold",
            "Awaiting QA",
            "QA Rework",
            "Closed",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn index_selects_from_the_picklist() {
        let statuses = picklist();
        assert_eq!(resolve_status_choice("0", &statuses).as_deref(), Some("Open"));
        assert_eq!(resolve_status_choice("6", &statuses).as_deref(), Some("Closed"));
        assert_eq!(resolve_status_choice("7", &statuses), None);
    }

    #[test]
    fn aliases_map_to_status_names() {
        let statuses = picklist();
        assert_eq!(
            resolve_status_choice("hold", &statuses).as_deref(),
            Some("On Hold")
        );
        assert_eq!(
            resolve_status_choice("qa", &statuses).as_deref(),
            Some("Awaiting QA")
        );
        assert_eq!(
            resolve_status_choice("rw", &statuses).as_deref(),
            Some("QA Rework")
        );
        assert_eq!(
            resolve_status_choice("rework", &statuses).as_deref(),
            Some("QA Rework")
        );
        assert_eq!(
            resolve_status_choice("ip", &statuses).as_deref(),
            Some("In Progress")
        );
        assert_eq!(
            resolve_status_choice("now", &statuses).as_deref(),
            Some("In Progress")
        );
        assert_eq!(
            resolve_status_choice("assigned", &statuses).as_deref(),
            Some("Assigned")
        );
        assert_eq!(
            resolve_status_choice("closed", &statuses).as_deref(),
            Some("Closed")
        );
    }

    #[test]
    fn underscored_names_match_case_insensitively() {
        let statuses = picklist();
        assert_eq!(
            resolve_status_choice("On_Hold", &statuses).as_deref(),
            Some("On Hold")
        );
        assert_eq!(
            resolve_status_choice("in_progress", &statuses).as_deref(),
            Some("In Progress")
        );
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        assert_eq!(resolve_status_choice("bogus", &picklist()), None);
    }
}
