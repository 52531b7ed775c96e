//! Error types for mcmanager
//!
//! Failures are split by the stage of a call that produced them:
//!
//! - **TransportError**: the HTTP exchange itself failed (I/O, non-2xx status,
//!   unparseable body)
//! - **ProtocolError**: the exchange succeeded but the envelope is unusable
//!   (server-reported error, absent response, correlation mismatch)
//! - **DecodeError**: the `result` payload does not have the shape the method
//!   promises
//! - **ValidationError**: the caller's input cannot form a valid request
//!
//! All four convert into the umbrella [`Error`] with `?`. None of them is
//! retried inside the client.
//!
//! # Examples
//!
//! ```rust
//! use mcmanager_core::{Error, JsonRpcErrorData, ProtocolError};
//!
//! let err: Error = ProtocolError::Server(JsonRpcErrorData::new(-32601, "Method not found")).into();
//! assert_eq!(err.kind(), "protocol");
//! ```

use crate::types::Id;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for mcmanager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error returned by every public client operation
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// The HTTP exchange failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response envelope was an error or did not belong to the request
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The result payload had an unexpected shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Caller input could not be turned into a request
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid client configuration (bad URL, HTTP client construction failure)
    #[error("Configuration error: {0}")]
    Config(String),

    /// A background task panicked or was abandoned before producing a result
    #[error("Task error: {0}")]
    Task(String),
}

impl Error {
    /// Short, stable label for the error category
    ///
    /// Used as the `error_type` attribute on client metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Transport(_) => "transport",
            Error::Protocol(_) => "protocol",
            Error::Decode(_) => "decode",
            Error::Validation(_) => "validation",
            Error::Config(_) => "config",
            Error::Task(_) => "task",
        }
    }
}

/// Failure of the HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection refused, reset, timed out, or the body could not be read
    #[error("I/O failure: {0}")]
    Io(String),

    /// The server answered with a non-2xx status; the body was not read
    #[error("HTTP status {status}")]
    HttpStatus {
        /// Observed status code
        status: u16,
    },

    /// The body of a 2xx response was not a well-formed response envelope
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

/// Failure detected while validating a response envelope
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// The server populated the `error` field
    #[error("Server error {0}")]
    Server(JsonRpcErrorData),

    /// No response envelope was returned at all
    #[error("Missing response")]
    MissingResponse,

    /// The response id does not echo the request id
    #[error("Correlation mismatch: expected {expected}, got {actual}")]
    CorrelationMismatch {
        /// Id sent with the request
        expected: Id,
        /// Id found on the response
        actual: Id,
    },
}

/// Failure translating a result payload into a typed value
///
/// `path` fields use a dotted/indexed notation rooted at `result`, for
/// example `result.mods[1].version`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A value was present but of the wrong JSON type
    #[error("{path}: expected {expected}, found {found}")]
    WrongType {
        /// Location of the offending value
        path: String,
        /// JSON type the decoder required
        expected: &'static str,
        /// JSON type actually present
        found: &'static str,
    },

    /// A required field was absent
    #[error("{path}: missing field")]
    MissingField {
        /// Location of the absent field
        path: String,
    },

    /// `params` and `paramTypes` of a command descriptor differ in length
    #[error("command '{command}': {params} parameter names but {param_types} parameter types")]
    LengthMismatch {
        /// Command whose descriptor is inconsistent
        command: String,
        /// Length of the `params` sequence
        params: usize,
        /// Length of the `paramTypes` sequence
        param_types: usize,
    },
}

/// Caller input that cannot form a valid request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Requests must name a method
    #[error("method name must not be empty")]
    EmptyMethod,

    /// A declared command parameter has no value in the argument map
    #[error("command '{command}' requires argument '{parameter}'")]
    MissingArgument {
        /// Command being executed
        command: String,
        /// Parameter with no supplied value
        parameter: String,
    },
}

/// JSON-RPC 2.0 error object as it appears in a response's `error` field
///
/// # Examples
///
/// ```rust
/// use mcmanager_core::JsonRpcErrorData;
///
/// let error: JsonRpcErrorData =
///     serde_json::from_str(r#"{"code":-32601,"message":"Method not found"}"#).unwrap();
/// assert_eq!(error.code, -32601);
/// assert_eq!(error.to_string(), "[-32601] Method not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    pub code: i64,

    /// Human-readable error message
    #[serde(default)]
    pub message: String,

    /// Optional additional error information
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create an error object with code and message
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error object carrying extra data
    pub fn with_data(code: i64, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}
