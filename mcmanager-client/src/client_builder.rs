//! Client builder for configuring the endpoint and other options
//!
//! The `ClientBuilder` provides a fluent API for configuring client behavior
//! before the first call. It allows you to:
//! - Assemble the root URL from protocol, host, port and API root
//! - Bound each exchange with a timeout
//! - Configure observability (OpenTelemetry)
//! - Set service name for telemetry
//!
//! # Examples
//!
//! ```rust,no_run
//! use mcmanager_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> mcmanager_core::Result<()> {
//! // From parts, with a short timeout
//! let client = ClientBuilder::from_parts("http", "localhost", 25566, "/")?
//!     .timeout(Duration::from_secs(5))
//!     .build()?;
//!
//! // With observability
//! let client2 = ClientBuilder::new("http://localhost:25566/")
//!     .with_default_observability()
//!     .service_name("my-console")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::metrics::ClientMetrics;
use crate::transport::HttpTransport;
use crate::ManagerClient;
use mcmanager_core::{Error, ObservabilityConfig, Result};
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for configuring and creating a [`ManagerClient`]
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    url: String,
    timeout: Duration,
    observability_config: Option<ObservabilityConfig>,
    service_name: Option<String>,
    enable_metrics: bool,
}

impl ClientBuilder {
    /// Create a new client builder for a full root URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            observability_config: None,
            service_name: None,
            enable_metrics: false,
        }
    }

    /// Create a builder from the endpoint's parts
    ///
    /// `api_root` gets a leading `/` if it lacks one, and IPv6 hosts are
    /// bracketed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a protocol other than `http`/`https` or
    /// an empty host.
    pub fn from_parts(protocol: &str, host: &str, port: u16, api_root: &str) -> Result<Self> {
        let protocol = protocol.trim().to_ascii_lowercase();
        if protocol != "http" && protocol != "https" {
            return Err(Error::Config(format!(
                "unsupported protocol '{}', expected http or https",
                protocol
            )));
        }

        let host = host.trim();
        if host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };

        let api_root = if api_root.starts_with('/') {
            api_root.to_string()
        } else {
            format!("/{}", api_root)
        };

        Ok(Self::new(format!("{}://{}:{}{}", protocol, host, port, api_root)))
    }

    /// Bound each exchange; expiry surfaces as a transport I/O error
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability or metrics are enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Record client metrics even without installing observability here
    ///
    /// Metrics are always recorded when observability is enabled.
    pub fn with_metrics(mut self, enable: bool) -> Self {
        self.enable_metrics = enable;
        self
    }

    /// The root URL the client will post to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Build the client
    ///
    /// Must be called outside an async context: the blocking HTTP client
    /// owns an internal runtime. OTLP exporters enabled by the observability
    /// config are hosted on a background export runtime in that case.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid URL or if observability
    /// fails to initialize.
    pub fn build(self) -> Result<ManagerClient<HttpTransport>> {
        let transport = HttpTransport::new(&self.url, self.timeout)?;

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            mcmanager_core::init_observability(config.clone()).map_err(|e| {
                Error::Config(format!("Failed to initialize observability: {}", e))
            })?;

            Some(Arc::new(ClientMetrics::new(config.service_name)))
        } else if self.enable_metrics {
            let name = self.service_name.unwrap_or_else(|| "mcmanager".to_string());
            Some(Arc::new(ClientMetrics::new(name)))
        } else {
            None
        };

        tracing::info!(endpoint = %transport.endpoint(), timeout_secs = self.timeout.as_secs_f64(), "Client configured");

        Ok(ManagerClient::with_transport(transport).with_metrics(metrics))
    }
}
