//! Telemetry module
//!
//! Structured logging and Prometheus metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{
    increment, record_edge, record_latency, set_gauge, CounterMetric, GaugeMetric, LatencyMetric,
};

use crate::config::TelemetryConfig;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize all telemetry subsystems
///
/// Must be called from within a tokio runtime when a metrics port is set.
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;

    if let Some(port) = config.metrics_port {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .map_err(|e| anyhow::anyhow!("Failed to start metrics exporter: {}", e))?;
        tracing::info!(%addr, "Prometheus exporter listening");
    }

    Ok(())
}
