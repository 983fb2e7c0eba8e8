//! vtiger::client
//!
//! The remote session client: connection parameters, session identity,
//! the challenge/response login handshake, and request dispatch.
//!
//! # Session lifecycle
//!
//! The session starts absent. A successful [`VtigerClient::login`] sets
//! the session identifier, user id, and expiry together; any failure
//! along the way leaves the previous session state untouched, so the
//! client is never half-authenticated. Callers holding an old valid
//! session can retry a failed login without losing it.

use std::time::Duration;

use chrono::Utc;
use md5::{Digest, Md5};
use serde_json::Value;

use super::response::{self, as_i64, ApiResponse};
use super::{AuthError, VtigerError};
use crate::ui::output::{self, Verbosity};

/// Default service path on the vTiger host.
const DEFAULT_ENDPOINT: &str = "/webservice.php";

/// User-Agent header value for all requests.
const USER_AGENT_VALUE: &str = "vtix vTiger client";

/// Fixed connect/read timeout. No request outlives this.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Redirect cap; the service endpoint should never redirect more than once.
const MAX_REDIRECTS: usize = 1;

/// Warn when a request is issued within this margin of session expiry.
const EXPIRY_MARGIN_SECS: i64 = 30;

/// After warning, push the warning window forward by this much so the
/// message does not repeat on every request. There is no renewal endpoint
/// to call; the warning is the whole mechanism.
const EXPIRY_WARN_SNOOZE_SECS: i64 = 300;

/// URL scheme for the service host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl std::fmt::Display for Scheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// HTTP method for a web-service operation. Reads use GET, writes
/// (`login`, `update`, `create`) use POST.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// An established session: all fields are set together by a successful
/// login and only read afterwards. The derived session key is consumed
/// at login and never stored.
#[derive(Debug, Clone)]
struct Session {
    /// Opaque session identifier issued by the server (`sessionName`).
    id: String,
    /// The vTiger user id of the authenticated user.
    user_id: String,
    /// Server-declared expiration (unix seconds).
    expires_at: i64,
}

/// Client for the vTiger web service.
pub struct VtigerClient {
    http: reqwest::Client,
    scheme: Scheme,
    host: String,
    endpoint: String,
    /// Administrative kill switch (`--no-transmit`).
    no_transmit: bool,
    session: Option<Session>,
    verbosity: Verbosity,
}

// Custom Debug so the session identifier never lands in traces.
impl std::fmt::Debug for VtigerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VtigerClient")
            .field("scheme", &self.scheme)
            .field("host", &self.host)
            .field("endpoint", &self.endpoint)
            .field("no_transmit", &self.no_transmit)
            .field("has_session", &self.session.is_some())
            .finish()
    }
}

impl VtigerClient {
    /// Create a client for `host`. Fails when the host is empty.
    ///
    /// `path` overrides the default service endpoint.
    pub fn new(
        host: &str,
        scheme: Scheme,
        path: Option<&str>,
        no_transmit: bool,
        verbosity: Verbosity,
    ) -> Result<Self, VtigerError> {
        let host = host.trim();
        if host.is_empty() {
            return Err(VtigerError::NoHost);
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|e| VtigerError::Transport {
                url: host.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            scheme,
            host: host.to_string(),
            endpoint: path.unwrap_or(DEFAULT_ENDPOINT).to_string(),
            no_transmit,
            session: None,
            verbosity,
        })
    }

    /// Whether a session identifier is currently set.
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// The authenticated user's vTiger id, once logged in.
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// When the session expires (unix seconds), once logged in. Moves
    /// forward when the expiry watchdog snoozes its warning.
    pub fn session_expires_at(&self) -> Option<i64> {
        self.session.as_ref().map(|s| s.expires_at)
    }

    fn service_url(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, self.endpoint)
    }

    /// Perform the two-step challenge/response login.
    ///
    /// Step one fetches a one-time challenge token for `username`; step
    /// two submits MD5(token + access_key) as the derived session key.
    /// Both steps must succeed for any session state to change.
    pub async fn login(&mut self, username: &str, access_key: &str) -> Result<(), AuthError> {
        let challenge = self
            .execute(
                &[("operation", "getchallenge"), ("username", username)],
                Method::Get,
            )
            .await?;
        if !challenge.success {
            return Err(AuthError::ChallengeRejected {
                username: username.to_string(),
            });
        }

        let token = challenge
            .result
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VtigerError::InvalidResponse("challenge response missing token".to_string())
            })?;
        let expires_at = challenge
            .result
            .get("expireTime")
            .and_then(as_i64)
            .ok_or_else(|| {
                VtigerError::InvalidResponse("challenge response missing expireTime".to_string())
            })?;

        let key = derive_session_key(token, access_key);

        let login = self
            .execute(
                &[
                    ("operation", "login"),
                    ("username", username),
                    ("accessKey", &key),
                ],
                Method::Post,
            )
            .await?;
        if !login.success {
            // The derived key is dropped here; the previous session (if
            // any) is still intact.
            return Err(AuthError::LoginRejected {
                username: username.to_string(),
            });
        }

        let id = login
            .result
            .get("sessionName")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VtigerError::InvalidResponse("login response missing sessionName".to_string())
            })?;
        let user_id = login
            .result
            .get("userId")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                VtigerError::InvalidResponse("login response missing userId".to_string())
            })?;

        self.session = Some(Session {
            id: id.to_string(),
            user_id: user_id.to_string(),
            expires_at,
        });

        Ok(())
    }

    /// Execute a web-service operation.
    ///
    /// When a session is established its identifier is injected into the
    /// outgoing parameters. GET encodes parameters into the query string;
    /// POST sends a URL-encoded body. Only transport-required headers are
    /// sent; the service rejects most custom headers.
    pub async fn execute(
        &mut self,
        params: &[(&str, &str)],
        method: Method,
    ) -> Result<ApiResponse, VtigerError> {
        if self.no_transmit {
            return Err(VtigerError::TransmissionDisabled);
        }

        self.warn_if_near_expiry();

        let mut form: Vec<(String, String)> = params
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        if let Some(session) = &self.session {
            form.push(("sessionName".to_string(), session.id.clone()));
        }

        let url = self.service_url();
        output::debug(format!("{:?} {}", method, url), self.verbosity);

        let request = match method {
            Method::Get => self.http.get(&url).query(&form),
            Method::Post => self.http.post(&url).form(&form),
        };

        let resp = request.send().await.map_err(|e| VtigerError::Transport {
            url: url.clone(),
            message: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(VtigerError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = resp.text().await.map_err(|e| VtigerError::Transport {
            url,
            message: e.to_string(),
        })?;
        output::debug(format!("response: {}", body), self.verbosity);

        response::parse(&body)
    }

    /// Session-expiry watchdog.
    ///
    /// vTiger declares an expiry at challenge time but no renewal endpoint
    /// exists, so all this can do is warn that re-authentication may be
    /// required if a request starts failing.
    fn warn_if_near_expiry(&mut self) {
        let Some(session) = &mut self.session else {
            return;
        };

        let now = Utc::now().timestamp();
        if now > session.expires_at - EXPIRY_MARGIN_SECS {
            output::warn(
                "session nearing expiry; you may need to login again if a request fails",
                self.verbosity,
            );
            session.expires_at += EXPIRY_WARN_SNOOZE_SECS;
        }
    }
}

/// Derive the session key from a challenge token and the user's access
/// key. The service specifies MD5 over the concatenation.
pub fn derive_session_key(token: &str, access_key: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(token.as_bytes());
    hasher.update(access_key.as_bytes());
    hex::encode(hasher.finalize())
}
