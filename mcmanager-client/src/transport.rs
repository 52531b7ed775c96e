//! Request/response exchange over HTTP
//!
//! A [`Transport`] performs exactly one round trip per call and blocks the
//! calling thread until the response arrives or the exchange fails. It never
//! retries. [`HttpTransport`] is the production implementation; any closure
//! with the matching signature is a transport too, which is how tests and
//! in-process fakes plug into [`crate::ManagerClient`].

use mcmanager_core::{codec, Error, JsonRpcRequest, JsonRpcResponse, Result, TransportError};
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// One synchronous request/response exchange
///
/// `Ok(None)` means the server answered successfully but with no response
/// envelope at all.
pub trait Transport {
    /// Send `request` and return the decoded response envelope
    fn send(&self, request: &JsonRpcRequest)
        -> std::result::Result<Option<JsonRpcResponse>, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&JsonRpcRequest) -> std::result::Result<Option<JsonRpcResponse>, TransportError>,
{
    fn send(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Option<JsonRpcResponse>, TransportError> {
        self(request)
    }
}

/// Blocking HTTP POST transport to a single root endpoint
///
/// Must not be used from inside an async task; run calls on a blocking
/// thread (see [`crate::TaskRunner`]).
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    endpoint: reqwest::Url,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint`
    ///
    /// `timeout` bounds the whole exchange; expiry surfaces as
    /// [`TransportError::Io`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL does not parse or the HTTP client
    /// cannot be constructed.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|e| Error::Config(format!("invalid endpoint '{}': {}", endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::Config(format!(
                "unsupported scheme '{}', expected http or https",
                endpoint.scheme()
            )));
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, endpoint })
    }

    /// The root URL every request is posted to
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }
}

impl Transport for HttpTransport {
    fn send(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Option<JsonRpcResponse>, TransportError> {
        let body = codec::encode_request(request)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map_err(|e| TransportError::Io(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                method = %request.method,
                status = status.as_u16(),
                "Unexpected HTTP status"
            );
            return Err(TransportError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .map_err(|e| TransportError::Io(e.to_string()))?;
        codec::decode_response(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcmanager_core::Id;

    #[test]
    fn test_rejects_unparseable_endpoint() {
        let result = HttpTransport::new("not a url", Duration::from_secs(1));
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        let result = HttpTransport::new("ftp://localhost:21/", Duration::from_secs(1));
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("ftp")),
            other => panic!("Expected Config error, got {:?}", other.map(|t| t.endpoint().to_string())),
        }
    }

    #[test]
    fn test_endpoint_is_normalized() {
        let transport = HttpTransport::new("http://localhost:25566", Duration::from_secs(1)).unwrap();
        assert_eq!(transport.endpoint(), "http://localhost:25566/");
    }

    #[test]
    fn test_closure_is_a_transport() {
        let transport = |request: &JsonRpcRequest| -> std::result::Result<_, TransportError> {
            Ok(Some(JsonRpcResponse::success(
                serde_json::json!(request.method.clone()),
                request.id.clone(),
            )))
        };
        let request = JsonRpcRequest::new("echo", None, Id::from("x"));
        let response = transport.send(&request).unwrap().unwrap();

        assert_eq!(response.result, Some(serde_json::json!("echo")));
    }
}
