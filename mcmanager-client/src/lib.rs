//! JSON-RPC 2.0 client for a game-server manager over HTTP
//!
//! This crate provides a typed client for the management methods a
//! long-running game server exposes. Each call is one blocking HTTP round
//! trip whose result is validated and decoded into a domain value.
//!
//! # Core Features
//!
//! - **HTTP Transport**: Blocking POST of JSON-RPC envelopes, pluggable via [`Transport`]
//! - **Validation**: Server errors and correlation mismatches rejected before decoding
//! - **Typed Decoding**: Command catalogue, mods, methods, and open info maps
//! - **Command Execution**: Requests shaped by the command's declared parameters
//! - **Background Tasks**: Calls moved off latency-sensitive threads via tokio
//! - **Observability**: OpenTelemetry integration for traces and metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcmanager_client::ManagerClient;
//! use serde_json::{json, Map};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ManagerClient::connect("http://localhost:25566/")?;
//!
//!     let info = client.server_info()?;
//!     println!("uptime: {}", info.get_i64("uptime")?);
//!
//!     let commands = client.list_commands()?;
//!     if let Some(say) = commands.iter().find(|c| c.name() == "say") {
//!         let mut args = Map::new();
//!         args.insert("text".into(), json!("hello"));
//!         client.execute(say, &args)?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # In the Background
//!
//! ```rust,no_run
//! use mcmanager_client::{BackgroundClient, ClientBuilder, RefreshCache, TaskRunner};
//! use std::time::Duration;
//!
//! # fn example() -> mcmanager_core::Result<()> {
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let client = ClientBuilder::new("http://localhost:25566/")
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//! let background = BackgroundClient::new(client, TaskRunner::new(runtime.handle().clone()));
//!
//! let mods = RefreshCache::new(Vec::new());
//! runtime.block_on(mods.refresh(background.list_mods()))?;
//! # Ok(())
//! # }
//! ```

mod cache;
mod client;
mod client_builder;
mod command;
mod decode;
mod metrics;
mod model;
mod task;
mod transport;
mod validate;

pub use cache::RefreshCache;
pub use client::{methods, ManagerClient};
pub use client_builder::ClientBuilder;
pub use command::{ArgType, Command, Parameter};
pub use decode::{
    decode_commands, decode_execution_result, decode_methods, decode_mods, decode_server_info,
    decode_stop,
};
pub use metrics::ClientMetrics;
pub use model::{DynamicMap, ExecutionResult, Mod, ServerInfo};
pub use task::{BackgroundClient, Task, TaskRunner};
pub use transport::{HttpTransport, Transport};
pub use validate::validate;
