//! cli::commands::login
//!
//! The `login` command: gather credentials and run the handshake.

use anyhow::Result;
use tokio::runtime::Runtime;

use crate::core::App;
use crate::ui::{output, prompts};
use crate::vtiger::{AuthError, VtigerError};

/// Log in to the vTiger service.
///
/// Credentials come from the config file when present; `force` re-prompts
/// for both. A rejected login is reported and the session stays as it
/// was. A transport-level failure during login is fatal - there is
/// nothing useful to do without a reachable server.
pub fn login(app: &mut App, rt: &Runtime, force: bool) -> Result<()> {
    output::print("Login to vTiger", app.verbosity);

    let configured = app.login_config().cloned().unwrap_or_default();

    let username = match configured.username.filter(|_| !force) {
        Some(username) => {
            output::print(
                format!("using configured username: {}", username),
                app.verbosity,
            );
            username
        }
        None => prompts::input("username: ")?,
    };

    let access_key = match configured.access_key.filter(|_| !force) {
        Some(key) => {
            output::print("using configured access key", app.verbosity);
            key
        }
        None => prompts::password("access key: ")?,
    };

    match rt.block_on(app.client.login(&username, &access_key)) {
        Ok(()) => {
            output::debug("login succeeded", app.verbosity);
            Ok(())
        }
        Err(AuthError::Request(VtigerError::TransmissionDisabled)) => {
            output::warn("vTiger transmissions are disabled; not logged in", app.verbosity);
            Ok(())
        }
        Err(AuthError::Request(e)) => {
            output::error(format!("communication failure: {}", e));
            std::process::exit(super::super::EXIT_COMM_FAILURE);
        }
        Err(e) => {
            output::error(format!("login failed: {}", e));
            Ok(())
        }
    }
}
