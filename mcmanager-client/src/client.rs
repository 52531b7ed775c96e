//! Manager client over a blocking transport
//!
//! This module provides [`ManagerClient`], the typed facade over the remote
//! management methods. Every operation follows the same pipeline:
//!
//! 1. **Build**: a request envelope with a fresh correlation id
//! 2. **Send**: one blocking round trip through the [`Transport`]
//! 3. **Validate**: no reported error, matching correlation id
//! 4. **Decode**: the method-specific result shape into a domain value
//!
//! Any stage can fail, and the failure is returned as-is; nothing is retried.
//!
//! # Blocking
//!
//! Calls block the current thread for the whole round trip. From async code,
//! go through [`crate::BackgroundClient`] instead.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcmanager_client::ManagerClient;
//!
//! # fn example() -> mcmanager_core::Result<()> {
//! let client = ManagerClient::connect("http://localhost:25566/")?;
//! for m in client.list_mods()? {
//!     println!("{}", m);
//! }
//! # Ok(())
//! # }
//! ```

use crate::client_builder::ClientBuilder;
use crate::command::Command;
use crate::decode;
use crate::metrics::ClientMetrics;
use crate::model::{ExecutionResult, Mod, ServerInfo};
use crate::transport::{HttpTransport, Transport};
use crate::validate::validate;
use mcmanager_core::{envelope, DecodeError, JsonRpcRequest, Result, ValidationError};
use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Instant;

/// Remote method names understood by the management server
pub mod methods {
    /// Command catalogue
    pub const GET_ALL_COMMANDS: &str = "getAllCommands";
    /// Open server info mapping
    pub const SYSTEM_INFO: &str = "systemInfo";
    /// Installed mods
    pub const GET_MODS: &str = "getMods";
    /// Graceful shutdown
    pub const STOP_SERVER: &str = "stopServer";
    /// Every method name the server exposes
    pub const GET_ALL_METHODS: &str = "getAllMethods";
}

/// Typed client for the management server
///
/// Holds no mutable state between calls; the endpoint is fixed at
/// construction. Share it across threads behind an `Arc`.
#[derive(Debug)]
pub struct ManagerClient<T = HttpTransport> {
    transport: T,
    metrics: Option<Arc<ClientMetrics>>,
}

impl ManagerClient<HttpTransport> {
    /// Connect to `url` with default settings
    ///
    /// Nothing goes over the wire until the first call.
    pub fn connect(url: &str) -> Result<Self> {
        ClientBuilder::new(url).build()
    }

    /// Start configuring a client for `url`
    pub fn builder(url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(url)
    }

    /// The root URL every request is posted to
    pub fn endpoint(&self) -> &str {
        self.transport.endpoint()
    }
}

impl<T: Transport> ManagerClient<T> {
    /// Create a client over any transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            metrics: None,
        }
    }

    pub(crate) fn with_metrics(mut self, metrics: Option<Arc<ClientMetrics>>) -> Self {
        self.metrics = metrics;
        self
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Invoke an arbitrary method and return its validated, undecoded result
    #[tracing::instrument(skip(self, method, params), fields(method = %method))]
    pub fn call(&self, method: &str, params: Option<Value>) -> Result<Value> {
        self.invoke(method, params, Ok)
    }

    /// Fetch the command catalogue
    #[tracing::instrument(skip(self), fields(method = methods::GET_ALL_COMMANDS))]
    pub fn list_commands(&self) -> Result<Vec<Command>> {
        self.invoke(methods::GET_ALL_COMMANDS, None, decode::decode_commands)
    }

    /// Fetch the open server info mapping
    #[tracing::instrument(skip(self), fields(method = methods::SYSTEM_INFO))]
    pub fn server_info(&self) -> Result<ServerInfo> {
        self.invoke(methods::SYSTEM_INFO, None, decode::decode_server_info)
    }

    /// Execute `command` with `arguments` keyed by parameter name
    ///
    /// # Errors
    ///
    /// Fails with a validation error before anything is sent if a declared
    /// parameter has no value.
    #[tracing::instrument(skip(self, command, arguments), fields(method = %command.name()))]
    pub fn execute(
        &self,
        command: &Command,
        arguments: &Map<String, Value>,
    ) -> Result<ExecutionResult> {
        self.run(
            command.name(),
            || command.execution_request(arguments),
            decode::decode_execution_result,
        )
    }

    /// Fetch installed mods in server order
    #[tracing::instrument(skip(self), fields(method = methods::GET_MODS))]
    pub fn list_mods(&self) -> Result<Vec<Mod>> {
        self.invoke(methods::GET_MODS, None, decode::decode_mods)
    }

    /// Ask the server to shut down
    #[tracing::instrument(skip(self), fields(method = methods::STOP_SERVER))]
    pub fn stop_server(&self) -> Result<()> {
        self.invoke(methods::STOP_SERVER, None, decode::decode_stop)
    }

    /// Fetch every method name the server exposes
    #[tracing::instrument(skip(self), fields(method = methods::GET_ALL_METHODS))]
    pub fn list_methods(&self) -> Result<Vec<String>> {
        self.invoke(methods::GET_ALL_METHODS, None, decode::decode_methods)
    }

    fn invoke<R>(
        &self,
        method: &str,
        params: Option<Value>,
        decoder: impl FnOnce(Value) -> std::result::Result<R, DecodeError>,
    ) -> Result<R> {
        self.run(method, || envelope::build_request(method, params), decoder)
    }

    fn run<R>(
        &self,
        method: &str,
        build: impl FnOnce() -> std::result::Result<JsonRpcRequest, ValidationError>,
        decoder: impl FnOnce(Value) -> std::result::Result<R, DecodeError>,
    ) -> Result<R> {
        let start = Instant::now();
        let outcome = self.exchange(build, decoder);
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "success", duration);
                }
                tracing::debug!(method = %method, duration_secs = duration, "Request completed successfully");
            }
            Err(error) => {
                if let Some(ref m) = self.metrics {
                    m.record_request(method, "error", duration);
                    m.record_error(error.kind());
                }
                tracing::error!(method = %method, kind = error.kind(), error = %error, "Request failed");
            }
        }

        outcome
    }

    fn exchange<R>(
        &self,
        build: impl FnOnce() -> std::result::Result<JsonRpcRequest, ValidationError>,
        decoder: impl FnOnce(Value) -> std::result::Result<R, DecodeError>,
    ) -> Result<R> {
        let request = build()?;
        tracing::debug!(id = %request.id, "Request sent, waiting for response");

        let response = self.transport.send(&request)?;
        let result = validate(response, &request)?;
        Ok(decoder(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcmanager_core::{
        Error, Id, JsonRpcErrorData, JsonRpcResponse, ProtocolError, TransportError,
    };
    use serde_json::json;
    use std::sync::Mutex;

    type Reply = std::result::Result<Option<JsonRpcResponse>, TransportError>;

    fn replying(result: Value) -> impl Fn(&JsonRpcRequest) -> Reply {
        move |request: &JsonRpcRequest| {
            Ok(Some(JsonRpcResponse::success(result.clone(), request.id.clone())))
        }
    }

    #[test]
    fn test_server_info_preserves_types() {
        let client = ManagerClient::with_transport(replying(json!({"uptime": 120, "players": 3})));
        let info = client.server_info().unwrap();

        assert_eq!(info.len(), 2);
        assert_eq!(info.get("uptime"), Some(&json!(120)));
        assert_eq!(info.get_i64("players").unwrap(), 3);
    }

    #[test]
    fn test_correlation_mismatch_fails() {
        let client = ManagerClient::with_transport(|_: &JsonRpcRequest| -> Reply {
            Ok(Some(JsonRpcResponse::success(
                json!({"methods": ["getMods"]}),
                Id::from("someone-else"),
            )))
        });

        match client.list_methods() {
            Err(Error::Protocol(ProtocolError::CorrelationMismatch { actual, .. })) => {
                assert_eq!(actual, Id::from("someone-else"));
            }
            other => panic!("Expected correlation mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_server_error_carries_code_and_message() {
        let client = ManagerClient::with_transport(|request: &JsonRpcRequest| -> Reply {
            Ok(Some(JsonRpcResponse::error(
                JsonRpcErrorData::new(-32601, "Method not found"),
                request.id.clone(),
            )))
        });

        match client.stop_server() {
            Err(Error::Protocol(ProtocolError::Server(data))) => {
                assert_eq!(data.code, -32601);
                assert_eq!(data.message, "Method not found");
            }
            other => panic!("Expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_response_fails() {
        let client = ManagerClient::with_transport(|_: &JsonRpcRequest| -> Reply { Ok(None) });
        assert!(matches!(
            client.server_info(),
            Err(Error::Protocol(ProtocolError::MissingResponse))
        ));
    }

    #[test]
    fn test_transport_failure_is_not_decoded() {
        let client = ManagerClient::with_transport(|_: &JsonRpcRequest| -> Reply {
            Err(TransportError::HttpStatus { status: 500 })
        });
        assert!(matches!(
            client.list_mods(),
            Err(Error::Transport(TransportError::HttpStatus { status: 500 }))
        ));
    }

    #[test]
    fn test_decode_error_surfaces_path() {
        let client = ManagerClient::with_transport(replying(json!({"mods": [{"name": "JEI"}]})));
        match client.list_mods() {
            Err(Error::Decode(DecodeError::MissingField { path })) => {
                assert_eq!(path, "result.mods[0].version");
            }
            other => panic!("Expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_list_methods_is_idempotent() {
        let client = ManagerClient::with_transport(replying(json!({
            "methods": ["getAllCommands", "systemInfo", "getMods"]
        })));

        let first = client.list_methods().unwrap();
        let second = client.list_methods().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec!["getAllCommands", "systemInfo", "getMods"]);
    }

    #[test]
    fn test_each_operation_uses_its_method() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let client = ManagerClient::with_transport(move |request: &JsonRpcRequest| -> Reply {
            log.lock().unwrap().push(request.method.clone());
            let result = match request.method.as_str() {
                methods::GET_ALL_COMMANDS => json!({}),
                methods::GET_MODS => json!({"mods": []}),
                methods::GET_ALL_METHODS => json!({"methods": []}),
                _ => json!({}),
            };
            Ok(Some(JsonRpcResponse::success(result, request.id.clone())))
        });

        client.list_commands().unwrap();
        client.server_info().unwrap();
        client.list_mods().unwrap();
        client.stop_server().unwrap();
        client.list_methods().unwrap();

        assert_eq!(
            *seen.lock().unwrap(),
            vec!["getAllCommands", "systemInfo", "getMods", "stopServer", "getAllMethods"]
        );
    }

    #[test]
    fn test_execute_sends_named_params() {
        let seen = Arc::new(Mutex::new(None));
        let log = seen.clone();
        let client = ManagerClient::with_transport(move |request: &JsonRpcRequest| -> Reply {
            *log.lock().unwrap() = Some(request.clone());
            Ok(Some(JsonRpcResponse::success(json!({"ok": true}), request.id.clone())))
        });

        let command = Command::new(
            "give",
            vec![
                crate::Parameter::new("player", crate::ArgType::String),
                crate::Parameter::new("count", crate::ArgType::Integer),
            ],
        );
        let arguments = match json!({"player": "alex", "count": 64}) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };

        let result = client.execute(&command, &arguments).unwrap();
        assert!(result.get_bool("ok").unwrap());

        let sent = seen.lock().unwrap().clone().unwrap();
        assert_eq!(sent.method, "give");
        assert_eq!(sent.params, Some(json!({"player": "alex", "count": 64})));
    }

    #[test]
    fn test_execute_missing_argument_sends_nothing() {
        let client = ManagerClient::with_transport(|_: &JsonRpcRequest| -> Reply {
            panic!("nothing should be sent")
        });
        let command = Command::new("kick", vec![crate::Parameter::new("player", crate::ArgType::String)]);

        assert!(matches!(
            client.execute(&command, &Map::new()),
            Err(Error::Validation(ValidationError::MissingArgument { .. }))
        ));
    }

    #[test]
    fn test_call_returns_raw_result() {
        let client = ManagerClient::with_transport(replying(json!([1, 2, 3])));
        assert_eq!(client.call("whatever", None).unwrap(), json!([1, 2, 3]));
        assert!(matches!(
            client.call("", None),
            Err(Error::Validation(ValidationError::EmptyMethod))
        ));
    }

    #[test]
    fn test_metrics_do_not_change_outcome() {
        let client = ManagerClient::with_transport(replying(json!({"methods": ["a"]})))
            .with_metrics(Some(Arc::new(ClientMetrics::new("client-test"))));
        assert_eq!(client.list_methods().unwrap(), vec!["a"]);
    }
}
