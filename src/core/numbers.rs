//! core::numbers
//!
//! Canonical ticket-number form.
//!
//! Users type ticket numbers bare (`9886`), with a lowercase marker
//! (`t9886`), or fully prefixed (`TT9886`). Everything that references a
//! ticket by number goes through [`normalize_ticket_number`] first so the
//! wire queries always see the canonical `TT<digits>` form.

use thiserror::Error;

/// The prefix vTiger puts on HelpDesk ticket numbers.
pub const TICKET_PREFIX: &str = "TT";

/// A ticket number that does not normalize to `TT<digits>`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid ticket number '{input}'")]
pub struct InvalidTicketNumber {
    /// The input as the user typed it.
    pub input: String,
}

/// Normalize a user-supplied ticket number to its canonical form.
///
/// Leading `t`/`T` markers are stripped (so an already-prefixed `TT9886`
/// round-trips), the `TT` prefix is prepended, and the remainder must be
/// one or more ASCII digits.
pub fn normalize_ticket_number(input: &str) -> Result<String, InvalidTicketNumber> {
    let digits = input.trim().trim_start_matches(['t', 'T']);

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InvalidTicketNumber {
            input: input.to_string(),
        });
    }

    Ok(format!("{}{}", TICKET_PREFIX, digits))
}
