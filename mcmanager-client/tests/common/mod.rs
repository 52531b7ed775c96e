//! Common test utilities for mcmanager-client integration tests
//!
//! This module provides a mock JSON-RPC HTTP server and reply helpers for
//! testing client behavior without a real game server.

#![allow(dead_code)]

use serde_json::{json, Map, Value};
use std::net::SocketAddr;
use std::sync::{mpsc, Arc, Mutex};
use tokio::sync::oneshot;
use warp::Filter;

/// What the mock server answers to one request
pub struct MockReply {
    pub status: u16,
    pub body: String,
}

impl MockReply {
    /// 200 with a success envelope echoing the request's id
    pub fn result(request: &Value, result: Value) -> Self {
        Self::with_id(result, request["id"].clone())
    }

    /// 200 with a success envelope carrying an arbitrary id
    pub fn with_id(result: Value, id: Value) -> Self {
        Self::raw(json!({"jsonrpc": "2.0", "result": result, "id": id}).to_string())
    }

    /// 200 with an error envelope echoing the request's id
    pub fn error(request: &Value, code: i64, message: &str) -> Self {
        Self::raw(
            json!({
                "jsonrpc": "2.0",
                "error": {"code": code, "message": message},
                "id": request["id"]
            })
            .to_string(),
        )
    }

    /// Bare HTTP status with an empty body
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }

    /// 200 with `body` sent verbatim
    pub fn raw(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// Mock JSON-RPC server over HTTP
///
/// Runs a warp server on its own thread and tokio runtime, so blocking
/// client calls can be made straight from the test thread. Every POST body
/// is parsed as JSON, recorded, and passed to the handler.
pub struct MockRpcServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockRpcServer {
    /// Start a mock server with a custom request handler
    pub fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&Value) -> MockReply + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = requests.clone();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let (addr_tx, addr_rx) = mpsc::channel();

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async move {
                let route = warp::post()
                    .and(warp::body::json())
                    .map(move |request: Value| {
                        recorded.lock().unwrap().push(request.clone());
                        let reply = (*handler)(&request);
                        warp::http::Response::builder()
                            .status(reply.status)
                            .header("content-type", "application/json")
                            .body(reply.body)
                            .unwrap()
                    });

                let (addr, server) = warp::serve(route).bind_with_graceful_shutdown(
                    ([127, 0, 0, 1], 0),
                    async move {
                        shutdown_rx.await.ok();
                    },
                );
                addr_tx.send(addr).unwrap();
                server.await;
            });
        });

        let addr = addr_rx.recv().unwrap();

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Start a server that answers each method with a fixed result
    pub fn with_results(results: Vec<(&'static str, Value)>) -> Self {
        Self::with_handler(move |request| {
            let method = request["method"].as_str().unwrap_or_default();
            match results.iter().find(|(name, _)| *name == method) {
                Some((_, result)) => MockReply::result(request, result.clone()),
                None => MockReply::error(request, -32601, "Method not found"),
            }
        })
    }

    /// Root URL for the client
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Every request body received so far, in arrival order
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockRpcServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Unwrap a `json!` object literal into argument map form
pub fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object, got {}", other),
    }
}

/// A local address with nothing listening on it
pub fn dead_endpoint() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/", addr)
}
