//! JSON-RPC 2.0 envelope types
//!
//! The management server speaks plain JSON-RPC 2.0 over HTTP. Every call is a
//! request envelope carrying a fresh correlation id, and every reply is a
//! response envelope echoing that id next to either a `result` or an `error`.
//!
//! # Request IDs
//!
//! The client always generates string ids (random UUIDs, see
//! [`crate::envelope`]). Responses are decoded leniently: a number is accepted
//! and a missing or null id decodes as [`Id::Null`], which can never match an
//! outgoing request and therefore fails correlation.

use crate::error::JsonRpcErrorData;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version written into every outgoing request.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC 2.0 request ID
///
/// This enum uses `#[serde(untagged)]` so it serializes as the bare inner
/// value, exactly as it appears on the wire.
///
/// # Examples
///
/// ```rust
/// use mcmanager_core::Id;
///
/// let id: Id = "1b4e28ba-2fa1-11d2-883f-0016d3cca427".into();
/// assert_eq!(id.to_string(), "\"1b4e28ba-2fa1-11d2-883f-0016d3cca427\"");
/// assert_eq!(Id::Number(7).to_string(), "7");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier, the form this client generates
    String(String),
    /// Numeric identifier, accepted from servers that echo numbers
    Number(i64),
    /// Missing or null identifier
    #[default]
    Null,
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "\"{}\"", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Id::String(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

/// JSON-RPC 2.0 request envelope
///
/// Serialized as `{"jsonrpc": "2.0", "method": ..., "id": ..., "params": ...}`,
/// with `params` omitted entirely when the method takes none.
///
/// Build these through [`crate::envelope::build_request`], which generates the
/// correlation id and rejects empty method names. [`JsonRpcRequest::new`] is
/// the raw constructor for callers that already hold an id.
///
/// # Examples
///
/// ```rust
/// use mcmanager_core::{Id, JsonRpcRequest};
///
/// let req = JsonRpcRequest::new("systemInfo", None, Id::from("abc"));
/// assert_eq!(req.jsonrpc, "2.0");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always [`JSONRPC_VERSION`]
    pub jsonrpc: String,
    /// Name of the remote method to invoke
    pub method: String,
    /// Optional parameters, skipped in JSON when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<serde_json::Value>,
    /// Correlation token echoed back by the server
    pub id: Id,
}

impl JsonRpcRequest {
    /// Create a request with an explicit id
    pub fn new(method: impl Into<String>, params: Option<serde_json::Value>, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }
}

/// JSON-RPC 2.0 response envelope
///
/// On success `result` is populated; on failure `error` is. Servers in the
/// wild sometimes omit `jsonrpc` or `id`, so both default instead of failing
/// to decode; the validator then reports the problem with a precise error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version reported by the server, empty if omitted
    #[serde(default)]
    pub jsonrpc: String,
    /// Method-defined result payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<serde_json::Value>,
    /// Server-reported failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcErrorData>,
    /// Correlation token copied from the request
    #[serde(default)]
    pub id: Id,
}

impl JsonRpcResponse {
    /// Create a successful response
    pub fn success(result: serde_json::Value, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    /// Create an error response
    pub fn error(error: JsonRpcErrorData, id: Id) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }

    /// Whether the server reported an error
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
