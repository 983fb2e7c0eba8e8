//! ui
//!
//! User interaction utilities: output formatting, interactive prompts,
//! and plain-ASCII table rendering.

pub mod output;
pub mod prompts;
pub mod table;
