//! Response validation
//!
//! Every call goes through [`validate`] before any method-specific decoding,
//! so all call sites enforce the same two rules: the server reported no
//! error, and the response carries the request's correlation id. A reported
//! error takes precedence over a mismatched id.

use mcmanager_core::{JsonRpcRequest, JsonRpcResponse, ProtocolError};
use serde_json::Value;

/// Check `response` against the `request` it answers and extract `result`
///
/// A response with neither `result` nor `error` yields `Value::Null`, which
/// is a valid outcome for methods that return nothing.
///
/// # Errors
///
/// - [`ProtocolError::MissingResponse`] if there is no response envelope
/// - [`ProtocolError::Server`] if the `error` field is populated
/// - [`ProtocolError::CorrelationMismatch`] if the ids differ
pub fn validate(
    response: Option<JsonRpcResponse>,
    request: &JsonRpcRequest,
) -> Result<Value, ProtocolError> {
    let response = response.ok_or(ProtocolError::MissingResponse)?;

    if let Some(error) = response.error {
        return Err(ProtocolError::Server(error));
    }

    if response.id != request.id {
        return Err(ProtocolError::CorrelationMismatch {
            expected: request.id.clone(),
            actual: response.id,
        });
    }

    Ok(response.result.unwrap_or(Value::Null))
}
