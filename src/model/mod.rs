//! model
//!
//! Value wrappers around raw vTiger web-service rows.
//!
//! # Design
//!
//! vTiger query results are flat JSON objects whose values are almost
//! always strings (numbers and booleans show up occasionally, so rows are
//! coerced to strings on construction). The wrappers expose typed
//! accessors over that map and a declared field projection used when
//! building queries. Update operations must echo the *complete* record
//! back to the service, so the underlying map is kept intact and
//! re-serialized wholesale.

mod account;
pub mod ticket;

pub use account::Account;
pub use ticket::Ticket;

use std::collections::BTreeMap;

use serde_json::Value;

/// Flatten a raw web-service row into a field-name -> string map.
///
/// Non-string scalars are rendered with their JSON representation; nulls
/// become empty strings. Nested values never appear in query rows.
pub(crate) fn coerce_row(row: &Value) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    if let Value::Object(map) = row {
        for (k, v) in map {
            let s = match v {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                other => other.to_string(),
            };
            fields.insert(k.clone(), s);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerce_row_handles_mixed_scalars() {
        let row = json!({
            "ticket_no": "TT9886",
            "hours": 4,
            "solution": null,
        });
        let fields = coerce_row(&row);
        assert_eq!(fields["ticket_no"], "TT9886");
        assert_eq!(fields["hours"], "4");
        assert_eq!(fields["solution"], "");
    }

    #[test]
    fn coerce_row_of_non_object_is_empty() {
        assert!(coerce_row(&json!("nope")).is_empty());
    }
}
