//! Background execution of blocking calls
//!
//! Every [`ManagerClient`] call blocks its thread for a full network round
//! trip. [`TaskRunner`] moves that work onto tokio's blocking pool and hands
//! back a [`Task`], which resolves to the typed result or failure.
//!
//! Dropping a [`Task`] discards interest in the outcome. The call itself
//! keeps running to completion and its result is thrown away.
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcmanager_client::{BackgroundClient, ManagerClient, TaskRunner};
//!
//! # fn example() -> mcmanager_core::Result<()> {
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let client = ManagerClient::connect("http://localhost:25566/")?;
//! let background = BackgroundClient::new(client, TaskRunner::new(runtime.handle().clone()));
//!
//! let mods = runtime.block_on(background.list_mods())?;
//! println!("{} mods", mods.len());
//! # Ok(())
//! # }
//! ```

use crate::client::ManagerClient;
use crate::command::Command;
use crate::model::{ExecutionResult, Mod, ServerInfo};
use crate::transport::{HttpTransport, Transport};
use mcmanager_core::{Error, Result};
use serde_json::{Map, Value};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::runtime::Handle;
use tokio::sync::oneshot;

/// Submits blocking work to a tokio runtime's blocking pool
#[derive(Debug, Clone)]
pub struct TaskRunner {
    handle: Handle,
}

impl TaskRunner {
    /// Run work on the runtime behind `handle`
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Run work on the runtime of the current async context
    ///
    /// # Errors
    ///
    /// Returns [`Error::Task`] outside a tokio runtime.
    pub fn current() -> Result<Self> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|e| Error::Task(e.to_string()))
    }

    /// Run `work` on a blocking thread and return a handle to its outcome
    pub fn spawn<F, T>(&self, work: F) -> Task<T>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (sender, receiver) = oneshot::channel();
        self.handle.spawn_blocking(move || {
            if sender.send(work()).is_err() {
                tracing::debug!("Task result discarded, no one is waiting");
            }
        });
        Task { receiver }
    }
}

/// Pending outcome of work submitted to a [`TaskRunner`]
///
/// Resolves to [`Error::Task`] if the work panicked.
#[must_use = "a task's result is lost unless it is awaited or waited on"]
#[derive(Debug)]
pub struct Task<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

impl<T> Task<T> {
    /// Block the current thread until the outcome is available
    ///
    /// For callers without an async context. Panics if called from within
    /// an async task; `.await` the task there instead.
    pub fn blocking_wait(self) -> Result<T> {
        self.receiver.blocking_recv().unwrap_or_else(|_| Err(abandoned()))
    }
}

impl<T> Future for Task<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|outcome| outcome.unwrap_or_else(|_| Err(abandoned())))
    }
}

fn abandoned() -> Error {
    Error::Task("task ended without producing a result".to_string())
}

/// [`ManagerClient`] whose operations run in the background
///
/// Mirrors the client's operations, each returning a [`Task`]. Cloning is
/// cheap and every clone shares the same client.
///
/// The wrapped client must be created, and finally dropped, outside an
/// async context when it uses [`HttpTransport`].
pub struct BackgroundClient<T = HttpTransport> {
    client: Arc<ManagerClient<T>>,
    runner: TaskRunner,
}

impl<T> Clone for BackgroundClient<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            runner: self.runner.clone(),
        }
    }
}

impl<T> BackgroundClient<T>
where
    T: Transport + Send + Sync + 'static,
{
    /// Wrap `client`, running its calls through `runner`
    pub fn new(client: ManagerClient<T>, runner: TaskRunner) -> Self {
        Self::from_shared(Arc::new(client), runner)
    }

    /// Wrap an already shared client
    pub fn from_shared(client: Arc<ManagerClient<T>>, runner: TaskRunner) -> Self {
        Self { client, runner }
    }

    /// The shared client, for direct blocking calls
    pub fn client(&self) -> &Arc<ManagerClient<T>> {
        &self.client
    }

    /// See [`ManagerClient::call`]
    pub fn call(&self, method: impl Into<String>, params: Option<Value>) -> Task<Value> {
        let method = method.into();
        self.submit(move |client| client.call(&method, params))
    }

    /// See [`ManagerClient::list_commands`]
    pub fn list_commands(&self) -> Task<Vec<Command>> {
        self.submit(|client| client.list_commands())
    }

    /// See [`ManagerClient::server_info`]
    pub fn server_info(&self) -> Task<ServerInfo> {
        self.submit(|client| client.server_info())
    }

    /// See [`ManagerClient::execute`]
    pub fn execute(&self, command: Command, arguments: Map<String, Value>) -> Task<ExecutionResult> {
        self.submit(move |client| client.execute(&command, &arguments))
    }

    /// See [`ManagerClient::list_mods`]
    pub fn list_mods(&self) -> Task<Vec<Mod>> {
        self.submit(|client| client.list_mods())
    }

    /// See [`ManagerClient::stop_server`]
    pub fn stop_server(&self) -> Task<()> {
        self.submit(|client| client.stop_server())
    }

    /// See [`ManagerClient::list_methods`]
    pub fn list_methods(&self) -> Task<Vec<String>> {
        self.submit(|client| client.list_methods())
    }

    fn submit<F, R>(&self, call: F) -> Task<R>
    where
        F: FnOnce(&ManagerClient<T>) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let client = self.client.clone();
        self.runner.spawn(move || call(&client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcmanager_core::{JsonRpcRequest, JsonRpcResponse, ProtocolError, TransportError};
    use serde_json::json;

    type Reply = std::result::Result<Option<JsonRpcResponse>, TransportError>;

    fn echo_server(request: &JsonRpcRequest) -> Reply {
        let result = match request.method.as_str() {
            "getMods" => json!({"mods": [{"name": "Forge", "version": "14.23"}]}),
            "getAllMethods" => json!({"methods": ["getMods"]}),
            "boom" => return Ok(None),
            _ => json!({"method": request.method, "params": request.params}),
        };
        Ok(Some(JsonRpcResponse::success(result, request.id.clone())))
    }

    fn background(runtime: &tokio::runtime::Runtime) -> BackgroundClient<fn(&JsonRpcRequest) -> Reply> {
        BackgroundClient::new(
            ManagerClient::with_transport(echo_server as fn(&JsonRpcRequest) -> Reply),
            TaskRunner::new(runtime.handle().clone()),
        )
    }

    #[test]
    fn test_task_resolves_with_result() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = background(&runtime);

        let mods = runtime.block_on(client.list_mods()).unwrap();
        assert_eq!(mods, vec![Mod::new("Forge", "14.23")]);
    }

    #[test]
    fn test_blocking_wait_outside_async_context() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = background(&runtime);

        let methods = client.list_methods().blocking_wait().unwrap();
        assert_eq!(methods, vec!["getMods"]);
    }

    #[test]
    fn test_task_delivers_failure() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = background(&runtime);

        let outcome = runtime.block_on(client.call("boom", None));
        assert!(matches!(outcome, Err(Error::Protocol(ProtocolError::MissingResponse))));
    }

    #[test]
    fn test_execute_owns_its_arguments() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let client = background(&runtime);

        let command = Command::new("say", vec![crate::Parameter::new("text", crate::ArgType::String)]);
        let mut arguments = Map::new();
        arguments.insert("text".into(), json!("hello"));

        let result = runtime.block_on(client.execute(command, arguments)).unwrap();
        assert_eq!(result.get_str("method").unwrap(), "say");
        assert_eq!(result.get_object("params").unwrap()["text"], "hello");
    }

    #[test]
    fn test_panicking_work_is_a_task_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let runner = TaskRunner::new(runtime.handle().clone());

        let task: Task<()> = runner.spawn(|| panic!("worker failed"));
        assert!(matches!(runtime.block_on(task), Err(Error::Task(_))));
    }

    #[test]
    fn test_dropped_task_does_not_cancel_work() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let runner = TaskRunner::new(runtime.handle().clone());
        let (done_tx, done_rx) = std::sync::mpsc::channel();

        drop(runner.spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            done_tx.send(()).unwrap();
            Ok(())
        }));

        done_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .unwrap();
    }

    #[test]
    fn test_current_requires_runtime() {
        assert!(matches!(TaskRunner::current(), Err(Error::Task(_))));

        let runtime = tokio::runtime::Runtime::new().unwrap();
        let runner = runtime.block_on(async { TaskRunner::current() });
        assert!(runner.is_ok());
    }
}
