//! vtix - An interactive CLI for vTiger HelpDesk tickets and time entries
//!
//! vtix is a single-binary REPL client for the vTiger CRM web service. It
//! authenticates via the challenge/response handshake, then lets you look up
//! tickets, change statuses, log time entries, and keep a local watch list
//! across sessions.
//!
//! # Architecture
//!
//! The codebase is layered, leaves first:
//!
//! - [`state`] - Embedded SQLite store for the watch list and time entries
//! - [`model`] - Ticket and Account value wrappers over raw web-service rows
//! - [`vtiger`] - Remote session client and ticket/account operations
//! - [`core`] - Configuration, ticket-number normalization, and the `App`
//!   context threaded through every operation
//! - [`cli`] - Argument parsing, the REPL loop, and command handlers
//! - [`ui`] - Output, prompts, and table rendering
//!
//! # Correctness Invariants
//!
//! 1. At most one session is live per process, and it is either fully
//!    authenticated (identifier and user id both set) or absent
//! 2. A ticket's watched flag is derived fresh from the local store at
//!    lookup time, never cached across fetches
//! 3. The local store schema version only moves forward; a failed upgrade
//!    disables the store for the session rather than crashing
//! 4. Nothing in the client retries; every failure surfaces to the caller

pub mod cli;
pub mod core;
pub mod model;
pub mod state;
pub mod ui;
pub mod vtiger;
