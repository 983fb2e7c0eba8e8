//! cli::commands::select
//!
//! The `set` command: choose the ticket that `-` and omitted arguments
//! refer to.

use crate::core::numbers::normalize_ticket_number;
use crate::core::App;
use crate::ui::output;

/// Set or clear the selected ticket.
///
/// The selection is not verified against the service; a typo surfaces on
/// the first command that uses it.
pub fn select(app: &mut App, arg: Option<&str>) {
    match arg {
        None => {
            app.clear_selected_ticket();
            output::print("ticket selection cleared", app.verbosity);
        }
        Some(input) => match normalize_ticket_number(input) {
            Ok(number) => {
                output::print(format!("selected {}", number), app.verbosity);
                app.select_ticket(number);
            }
            Err(e) => output::error(e),
        },
    }
}
