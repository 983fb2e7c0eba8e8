//! model::ticket
//!
//! A vTiger HelpDesk trouble ticket.
//!
//! Several interesting attributes live in installation-specific custom
//! fields (`cf_*`); the constants below name the ones this client uses.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{coerce_row, Account};

/// Custom field: ticket type (e.g. "Problem Submission").
const CF_TYPE: &str = "cf_565";
/// Custom field: billing type (e.g. "Hourly").
const CF_BILLING: &str = "cf_539";
/// Custom field: priority code (e.g. "101"). Also the primary sort key
/// for the assigned-ticket listing.
pub const CF_PRIORITY: &str = "cf_551";
/// Custom field: due date.
const CF_DUE_DATE: &str = "cf_555";

/// The projection requested when querying HelpDesk records.
const QUERY_FIELDS: &[&str] = &[
    "id",
    "parent_id",
    "ticket_no",
    "ticket_title",
    "ticketseverities",
    "description",
    "createdtime",
    "modifiedtime",
    "ticketstatus",
    "assigned_user_id",
    CF_TYPE,
    CF_BILLING,
    CF_PRIORITY,
    CF_DUE_DATE,
    "hours",
];

/// A single HelpDesk ticket as returned by the web service.
///
/// The raw field map is retained because `update` operations require the
/// complete record to be echoed back, even when only one field changed.
/// The `account` and `watched` attachments are local enrichments and are
/// never sent over the wire.
#[derive(Debug, Clone)]
pub struct Ticket {
    fields: BTreeMap<String, String>,
    account: Account,
    watched: bool,
}

impl Ticket {
    /// Construct a ticket from a raw query-result row.
    pub fn from_row(row: &Value) -> Self {
        Self {
            fields: coerce_row(row),
            account: Account::unknown(),
            watched: false,
        }
    }

    /// The field projection for HelpDesk queries.
    ///
    /// `complete` requests every field (`*`); update operations need the
    /// full record, so lookups that precede an update must be complete.
    pub fn query_fields(complete: bool) -> String {
        if complete {
            "*".to_string()
        } else {
            QUERY_FIELDS.join(",")
        }
    }

    fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    /// The opaque webservice id (e.g. `9x13099`).
    pub fn id(&self) -> &str {
        self.field("id")
    }

    /// The id of the account this ticket belongs to (`parent_id`).
    pub fn account_id(&self) -> &str {
        self.field("parent_id")
    }

    /// The id of the user the ticket is assigned to.
    pub fn assigned_user_id(&self) -> &str {
        self.field("assigned_user_id")
    }

    /// The human-facing ticket number (e.g. `TT9886`).
    pub fn number(&self) -> &str {
        self.field("ticket_no")
    }

    pub fn title(&self) -> &str {
        self.field("ticket_title")
    }

    pub fn status(&self) -> &str {
        self.field("ticketstatus")
    }

    pub fn ticket_type(&self) -> &str {
        self.field(CF_TYPE)
    }

    pub fn severity(&self) -> &str {
        self.field("ticketseverities")
    }

    pub fn billing_type(&self) -> &str {
        self.field(CF_BILLING)
    }

    pub fn priority(&self) -> &str {
        self.field(CF_PRIORITY)
    }

    pub fn due_date(&self) -> &str {
        self.field(CF_DUE_DATE)
    }

    /// Logged hours (level of effort).
    pub fn hours(&self) -> &str {
        self.field("hours")
    }

    /// Set the status field locally. Takes effect remotely only after an
    /// `update` operation serializes the record back.
    pub fn set_status(&mut self, status: &str) {
        self.fields
            .insert("ticketstatus".to_string(), status.to_string());
    }

    /// The complete field map, for `update` serialization.
    pub fn ws_object(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn account_name(&self) -> &str {
        self.account.name()
    }

    pub fn set_account(&mut self, account: Account) {
        self.account = account;
    }

    pub fn is_watched(&self) -> bool {
        self.watched
    }

    pub fn set_watched(&mut self, watched: bool) {
        self.watched = watched;
    }
}
