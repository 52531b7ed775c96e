//! Request envelope construction
//!
//! Every call gets a fresh random correlation id. IDs are v4 UUIDs rendered
//! as hyphenated strings, so uniqueness holds per client without any shared
//! counter between calls.

use crate::error::ValidationError;
use crate::types::{Id, JsonRpcRequest};
use uuid::Uuid;

/// Generate a new 128-bit random correlation id
pub fn next_id() -> Id {
    Id::String(Uuid::new_v4().to_string())
}

/// Build a protocol-compliant request for `method`
///
/// The only side effect is generating the correlation id.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyMethod`] if `method` is empty.
///
/// # Examples
///
/// ```rust
/// use mcmanager_core::envelope::build_request;
///
/// let a = build_request("systemInfo", None).unwrap();
/// let b = build_request("systemInfo", None).unwrap();
/// assert_eq!(a.method, "systemInfo");
/// assert_ne!(a.id, b.id);
/// ```
pub fn build_request(
    method: impl Into<String>,
    params: Option<serde_json::Value>,
) -> Result<JsonRpcRequest, ValidationError> {
    let method = method.into();
    if method.is_empty() {
        return Err(ValidationError::EmptyMethod);
    }
    Ok(JsonRpcRequest::new(method, params, next_id()))
}
