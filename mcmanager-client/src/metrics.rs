//! Client metrics definitions
//!
//! OpenTelemetry instruments recorded by [`crate::ManagerClient`] when metrics
//! are enabled on the builder. Without a global meter provider (see
//! `mcmanager_core::init_observability`) they are no-ops.
//!
//! - **mcmanager.client.requests.total**: calls issued, by method and status
//! - **mcmanager.client.request.duration**: call latency in seconds
//! - **mcmanager.client.errors.total**: failed calls, by error category

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    InstrumentationScope, KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls issued
    pub requests_total: Counter<u64>,
    /// Call duration in seconds, from envelope build to decoded result
    pub request_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider, scoped to `service_name`
    pub fn new(service_name: impl Into<String>) -> Self {
        let scope = InstrumentationScope::builder(service_name.into())
            .with_version(env!("CARGO_PKG_VERSION"))
            .build();
        Self::new_with_meter(&global::meter_with_scope(scope))
    }

    /// Create metrics on an explicit meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            requests_total: meter
                .u64_counter("mcmanager.client.requests.total")
                .with_description("Total number of calls issued")
                .build(),
            request_duration: meter
                .f64_histogram("mcmanager.client.request.duration")
                .with_description("Call duration in seconds")
                .with_unit("s")
                .build(),
            errors_total: meter
                .u64_counter("mcmanager.client.errors.total")
                .with_description("Total number of failed calls")
                .build(),
        }
    }

    /// Record a completed call
    pub fn record_request(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.requests_total.add(1, attributes);
        self.request_duration.record(duration_secs, attributes);
    }

    /// Record a failed call by category (`transport`, `protocol`, ...)
    pub fn record_error(&self, error_type: &str) {
        let attributes = &[KeyValue::new("error_type", error_type.to_string())];
        self.errors_total.add(1, attributes);
    }
}

impl std::fmt::Debug for ClientMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientMetrics").finish_non_exhaustive()
    }
}
