//! mcmanager - JSON-RPC management client for a game-server manager
//!
//! This is the main convenience crate that re-exports the mcmanager
//! sub-crates. Use it if you want a single dependency.
//!
//! # Architecture
//!
//! - **mcmanager-core**: Wire types, envelope builder, codec, error handling, observability
//! - **mcmanager-client**: HTTP transport, validation, decoders, domain model, background tasks
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mcmanager::ManagerClient;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ManagerClient::connect("http://localhost:25566/")?;
//!
//!     for name in client.list_methods()? {
//!         println!("{}", name);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all public APIs from sub-crates
pub use mcmanager_client as client;
pub use mcmanager_core as core;

// Convenience re-exports of the most commonly used types
pub use mcmanager_client::{
    ArgType, BackgroundClient, ClientBuilder, Command, DynamicMap, ManagerClient, Mod,
    RefreshCache, TaskRunner,
};
pub use mcmanager_core::{Error, ObservabilityConfig, Result};
