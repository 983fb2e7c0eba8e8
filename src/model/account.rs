//! model::account
//!
//! A vTiger account (Accounts module entity).

use std::collections::BTreeMap;

use serde_json::Value;

use super::coerce_row;

/// Display name used when no account lookup succeeded.
const PLACEHOLDER_NAME: &str = "Unknown";

/// An account row, or a placeholder when resolution failed.
///
/// Accounts are immutable once constructed; the in-memory cache in
/// [`crate::core::App`] holds them for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Account {
    fields: BTreeMap<String, String>,
}

impl Account {
    /// Construct an account from a raw query-result row.
    pub fn from_row(row: &Value) -> Self {
        Self {
            fields: coerce_row(row),
        }
    }

    /// The placeholder account attached when lookup fails or returns
    /// nothing. Ticket rendering must never fail for lack of an account.
    pub fn unknown() -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("accountname".to_string(), PLACEHOLDER_NAME.to_string());
        Self { fields }
    }

    /// The projection requested when querying Accounts records.
    pub fn query_fields() -> &'static str {
        "id,accountname,account_no"
    }

    fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn id(&self) -> &str {
        self.field("id")
    }

    pub fn name(&self) -> &str {
        self.field("accountname")
    }

    pub fn number(&self) -> &str {
        self.field("account_no")
    }

    pub fn is_placeholder(&self) -> bool {
        self.id().is_empty()
    }
}
