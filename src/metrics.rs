// src/metrics.rs
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the global Prometheus recorder and describe the series this service emits.
    /// Fails if a recorder is already installed in this process.
    pub fn install() -> anyhow::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;

        describe_counter!("sheets_fetch_total", "Upstream value-range requests.");
        describe_counter!(
            "sheets_fetch_errors_total",
            "Upstream requests that failed (transport, status, or body)."
        );
        describe_histogram!("sheets_fetch_ms", "Upstream request time in milliseconds.");
        describe_counter!(
            "records_dropped_total",
            "Rows dropped by validity filtering."
        );
        describe_counter!("list_requests_total", "List requests by kind and outcome.");

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
