//! cli::commands::debug
//!
//! Hidden commands that dump raw web service metadata. Useful when
//! pointing vtix at a new installation to discover module names and
//! custom field ids.

use tokio::runtime::Runtime;

use crate::core::App;
use crate::ui::output;
use crate::vtiger::Method;

/// `debug_listtypes`: dump the module types the service exposes.
pub fn listtypes(app: &mut App, rt: &Runtime) {
    let response = rt.block_on(
        app.client
            .execute(&[("operation", "listtypes")], Method::Get),
    );
    dump(app, response);
}

/// `debug_describe <module>`: dump a module description, fields and
/// picklists included.
pub fn describe(app: &mut App, rt: &Runtime, element: Option<&str>) {
    let Some(element) = element else {
        output::print("usage: debug_describe <module>", app.verbosity);
        return;
    };
    let element = capitalize(element);

    let response = rt.block_on(app.client.execute(
        &[("operation", "describe"), ("elementType", &element)],
        Method::Get,
    ));
    dump(app, response);
}

fn dump(app: &App, response: Result<crate::vtiger::ApiResponse, crate::vtiger::VtigerError>) {
    match response {
        Ok(r) if r.success => match serde_json::to_string_pretty(&r.result) {
            Ok(pretty) => output::print(pretty, app.verbosity),
            Err(e) => output::error(e),
        },
        Ok(r) => output::print(
            format!("request rejected: {}", r.error_message()),
            app.verbosity,
        ),
        Err(e) => output::error(e),
    }
}

/// Module names are capitalized server-side ("HelpDesk" aside, which is
/// spelled out anyway when debugging).
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_upcases_the_first_letter_only() {
        assert_eq!(capitalize("accounts"), "Accounts");
        assert_eq!(capitalize("Timesheet"), "Timesheet");
        assert_eq!(capitalize(""), "");
    }
}
