//! cli
//!
//! Startup sequencing and the interactive shell.
//!
//! # Responsibilities
//!
//! - Parse process flags and resolve the environment (home, config,
//!   state store, host)
//! - Build the [`crate::core::App`] context and perform the initial login
//! - Run the REPL and dispatch commands
//!
//! Command handlers are thin: they validate arguments, call into
//! [`crate::vtiger`] operations, and format output. All remote I/O is
//! driven through one current-thread tokio runtime owned here.

pub mod args;
pub mod commands;
pub mod repl;

pub use args::Cli;

use std::process;

use anyhow::Result;

use crate::core::config::{split_host, Config};
use crate::core::App;
use crate::state::StateStore;
use crate::ui::output::{self, Verbosity};
use crate::vtiger::VtigerClient;

/// State database file name inside the home directory.
const STATE_FILE: &str = ".vtixdb.sqlite";

/// Exit code when no home directory can be determined.
const EXIT_NO_HOME: i32 = 3;
/// Exit code when no host is configured.
const EXIT_NO_HOST: i32 = 4;
/// Exit code for a communication failure during the initial login.
pub(crate) const EXIT_COMM_FAILURE: i32 = 500;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    let Some(home) = cli.home.clone().or_else(dirs::home_dir) else {
        output::error("unable to determine your home directory; try --home=<path>");
        process::exit(EXIT_NO_HOME);
    };
    output::debug(format!("using home {}", home.display()), verbosity);

    let config = match Config::load(&home) {
        Ok(config) => config,
        Err(e) => {
            output::warn(format!("ignoring config: {}", e), verbosity);
            None
        }
    };
    if config.is_none() {
        output::print(first_run_hint(), verbosity);
    }

    let state = if cli.no_storage {
        None
    } else {
        match StateStore::open(&home.join(STATE_FILE)) {
            Ok(store) => Some(store),
            Err(e) => {
                output::warn(
                    format!("unable to open local state; disabling for this session: {}", e),
                    verbosity,
                );
                None
            }
        }
    };

    let configured_host = cli
        .host
        .clone()
        .or_else(|| config.as_ref().and_then(|c| c.login.host.clone()));
    let Some(host_value) = configured_host else {
        output::error("no host defined; use --host or the config file");
        process::exit(EXIT_NO_HOST);
    };
    let (scheme, host) = split_host(&host_value);
    output::debug(format!("using host {} over {}", host, scheme), verbosity);

    let client = VtigerClient::new(&host, scheme, None, cli.no_transmit, verbosity)?;
    let mut app = App::new(client, state, config, verbosity);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    // Authenticate up front; a rejected login drops into the REPL where
    // `login force` can retry with fresh credentials.
    commands::login(&mut app, &rt, false)?;

    repl::run(&mut app, &rt)
}

fn first_run_hint() -> String {
    format!(
        "Welcome to vtix!\n\n\
         You will need your \"Access Key\" from the \"My Preferences\" page in vTiger.\n\
         To let vtix log in automatically, create ~/{} like:\n\n\
         \x20   [login]\n\
         \x20   host = \"https://vtiger.example.com\"\n\
         \x20   username = \"<user>\"\n\
         \x20   access_key = \"<access key>\"\n",
        crate::core::config::CONFIG_FILE
    )
}
