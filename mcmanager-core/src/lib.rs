//! Core JSON-RPC 2.0 types for the mcmanager client
//!
//! This crate holds everything about the protocol that does not depend on a
//! particular transport:
//!
//! - **Types**: request/response envelopes, ids, the protocol version
//! - **Envelope**: building requests with fresh correlation ids
//! - **Codec**: encoding requests and decoding response bodies
//! - **Error handling**: the transport/protocol/decode/validation taxonomy
//! - **Observability**: tracing subscriber and OpenTelemetry setup
//!
//! # Example
//!
//! ```rust
//! use mcmanager_core::{codec, envelope};
//!
//! let request = envelope::build_request("getAllMethods", None).unwrap();
//! let bytes = codec::encode_request(&request).unwrap();
//! assert!(!bytes.is_empty());
//! ```

pub mod codec;
pub mod envelope;
pub mod error;
pub mod observability;
pub mod types;

pub use error::{
    DecodeError, Error, JsonRpcErrorData, ProtocolError, Result, TransportError, ValidationError,
};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{Id, JsonRpcRequest, JsonRpcResponse, JSONRPC_VERSION};
