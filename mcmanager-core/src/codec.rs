//! Wire encoding for request and response envelopes
//!
//! Requests are encoded to UTF-8 JSON bytes. Response bodies are decoded in
//! two steps: first to a generic JSON value, so a syntactically broken body is
//! told apart from a well-formed body of the wrong shape, then to a
//! [`JsonRpcResponse`].
//!
//! A body consisting of JSON `null` decodes to `None` (an absent response),
//! which the validator reports as [`crate::ProtocolError::MissingResponse`].
//!
//! # Examples
//!
//! ```rust
//! use mcmanager_core::{codec, Id};
//!
//! let body = br#"{"jsonrpc":"2.0","id":"abc","result":{"uptime":120}}"#;
//! let response = codec::decode_response(body).unwrap().unwrap();
//! assert_eq!(response.id, Id::from("abc"));
//! ```

use crate::error::TransportError;
use crate::types::{JsonRpcRequest, JsonRpcResponse};

/// Encode a request envelope to JSON bytes
///
/// # Errors
///
/// Returns [`TransportError::MalformedPayload`] if the params cannot be
/// serialized, which only happens for non-string map keys smuggled in
/// through a custom `Serialize` impl.
pub fn encode_request(request: &JsonRpcRequest) -> Result<Vec<u8>, TransportError> {
    serde_json::to_vec(request).map_err(|e| TransportError::MalformedPayload(e.to_string()))
}

/// Decode a response body
///
/// # Errors
///
/// Returns [`TransportError::MalformedPayload`] if the body is not JSON or
/// is JSON that is neither `null` nor a response object.
pub fn decode_response(body: &[u8]) -> Result<Option<JsonRpcResponse>, TransportError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| TransportError::MalformedPayload(e.to_string()))?;

    if value.is_null() {
        return Ok(None);
    }
    if !value.is_object() {
        return Err(TransportError::MalformedPayload(format!(
            "expected a response object, got {}",
            json_type_name(&value)
        )));
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| TransportError::MalformedPayload(e.to_string()))
}

/// JSON type name of a value, as used in error messages
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
