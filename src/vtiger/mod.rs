//! vtiger
//!
//! Client for the vTiger CRM web service and the ticket/account/timesheet
//! operations built on top of it.
//!
//! # Protocol
//!
//! vTiger exposes a single endpoint (`/webservice.php`); the operation is
//! selected by an `operation` parameter (`getchallenge`, `login`, `query`,
//! `describe`, `update`, `create`, `listtypes`). Reads go over GET with the
//! parameters in the query string; writes go over POST with a URL-encoded
//! body. Once authenticated, every request carries a `sessionName`
//! parameter.
//!
//! # Known server quirks
//!
//! - The service rejects most custom headers, so requests carry only what
//!   the transport requires.
//! - A server-side fault can arrive as HTTP 200 with a human-readable
//!   exception dump instead of JSON. [`response`] detects the fault marker
//!   and classifies it as a remote error before any JSON parse is
//!   attempted; a 200 is never assumed to be valid JSON.

pub mod accounts;
pub mod client;
pub mod helpdesk;
pub mod response;
pub mod timesheet;

pub use client::{Method, Scheme, VtigerClient};
pub use helpdesk::HelpdeskError;
pub use response::ApiResponse;

use thiserror::Error;

/// Errors from the remote session client.
///
/// These map the failure modes of a single request: administratively
/// disabled transmission, transport faults, server-side faults, and
/// undecodable payloads. Nothing here retries; callers decide.
#[derive(Debug, Error)]
pub enum VtigerError {
    /// `--no-transmit` is set; no network call was made.
    #[error("transmissions to the vTiger server are disabled")]
    TransmissionDisabled,

    /// No hostname was provided at configuration time.
    #[error("no hostname provided")]
    NoHost,

    /// The request never completed (connect failure, timeout, TLS).
    #[error("request to '{url}' failed: {message}")]
    Transport { url: String, message: String },

    /// The server answered with a non-2xx status. The body is discarded.
    #[error("server returned HTTP {status} for '{url}'")]
    HttpStatus { status: u16, url: String },

    /// The body carried the embedded fault marker (an uncaught server
    /// exception dumped into an HTTP 200 response).
    #[error("vTiger reported a server-side fault")]
    RemoteFault {
        /// Leading portion of the fault dump, for diagnostics.
        detail: String,
    },

    /// The server rejected the operation with a structured failure.
    #[error("operation '{operation}' failed: {message}")]
    Rejected { operation: String, message: String },

    /// The body was not decodable as a web-service response.
    #[error("server replied with an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the two-step login handshake.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The challenge request was refused for this username.
    #[error("challenge request rejected for user '{username}'")]
    ChallengeRejected { username: String },

    /// The login step was refused (bad access key, disabled account).
    #[error("login rejected for user '{username}'")]
    LoginRejected { username: String },

    /// A request failed below the protocol level.
    #[error(transparent)]
    Request(#[from] VtigerError),
}
