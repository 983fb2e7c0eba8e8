//! core::context
//!
//! The process context threaded through every operation.
//!
//! # Design
//!
//! All mutable process state lives in one explicitly constructed [`App`]
//! value owned by the REPL loop: the remote client and its session, the
//! optional local store, the in-memory account cache, and the selected
//! ticket pointer. Operations take `&mut App`; there are no globals.

use std::collections::HashMap;

use crate::core::config::Config;
use crate::model::Account;
use crate::state::StateStore;
use crate::ui::output::Verbosity;
use crate::vtiger::VtigerClient;

/// Everything a command needs: connection, session, caches, and state.
pub struct App {
    /// Remote session client (owns the session identity).
    pub client: VtigerClient,
    /// Local state store; `None` when disabled (`--no-storage` or a
    /// failed open/upgrade).
    pub state: Option<StateStore>,
    /// Account cache, keyed by the id the lookup was issued for.
    /// Entries are immutable once inserted.
    pub accounts: HashMap<String, Account>,
    /// The normalized ticket number targeted by `-`/empty arguments.
    pub selected: Option<String>,
    /// Loaded configuration, if a config file was present.
    pub config: Option<Config>,
    pub verbosity: Verbosity,
}

impl App {
    pub fn new(
        client: VtigerClient,
        state: Option<StateStore>,
        config: Option<Config>,
        verbosity: Verbosity,
    ) -> Self {
        Self {
            client,
            state,
            accounts: HashMap::new(),
            selected: None,
            config,
            verbosity,
        }
    }

    /// The selected ticket number, if one is set.
    pub fn selected_ticket(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select_ticket(&mut self, ticket_num: String) {
        self.selected = Some(ticket_num);
    }

    pub fn clear_selected_ticket(&mut self) {
        self.selected = None;
    }

    /// A config value from the `[login]` table, if configured.
    pub fn login_config(&self) -> Option<&crate::core::config::LoginConfig> {
        self.config.as_ref().map(|c| &c.login)
    }

    /// The REPL prompt, reflecting the selected ticket.
    pub fn prompt(&self) -> String {
        match &self.selected {
            Some(num) => format!("vtix/{}=> ", num),
            None => "vtix=> ".to_string(),
        }
    }
}
