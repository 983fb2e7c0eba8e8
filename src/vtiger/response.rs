//! vtiger::response
//!
//! Decoding and classification of web-service response bodies.

use serde::Deserialize;
use serde_json::Value;

use super::VtigerError;

/// Marker text embedded in a server-side fault dump. vTiger can return
/// HTTP 200 with one of these instead of JSON.
const FAULT_MARKER: &str = "Uncaught exception";

/// How much of a fault dump to keep for diagnostics.
const FAULT_DETAIL_LEN: usize = 200;

/// A decoded web-service response.
///
/// Every response carries at least a `success` flag. The `result` payload
/// is operation-specific: `query` returns an array of field maps,
/// `describe` an object with a `fields` array, `getchallenge`/`login`
/// nested token/session objects. An unsuccessful response carries an
/// `error` object instead.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RemoteFailure>,
}

/// The structured failure attached to an unsuccessful response.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFailure {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiResponse {
    /// The `result` payload as query rows. Empty for non-array results.
    pub fn rows(&self) -> &[Value] {
        self.result.as_array().map(Vec::as_slice).unwrap_or(&[])
    }

    /// A printable message for an unsuccessful response.
    pub fn error_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|e| e.message.clone())
            .unwrap_or_else(|| "no error message provided".to_string())
    }

    /// Turn an unsuccessful response into a [`VtigerError::Rejected`].
    pub fn rejection(&self, operation: &str) -> VtigerError {
        VtigerError::Rejected {
            operation: operation.to_string(),
            message: self.error_message(),
        }
    }
}

/// Decode a response body, classifying fault dumps before parsing.
pub fn parse(body: &str) -> Result<ApiResponse, VtigerError> {
    if body.contains(FAULT_MARKER) {
        return Err(VtigerError::RemoteFault {
            detail: body.chars().take(FAULT_DETAIL_LEN).collect(),
        });
    }

    serde_json::from_str(body).map_err(|e| VtigerError::InvalidResponse(e.to_string()))
}

/// Read an integer that the service may encode as a number or a string.
pub(crate) fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}
