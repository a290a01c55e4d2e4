//! Prometheus metrics

use crate::edge::EdgeType;
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Market passed the volume gate and was scanned
    MarketScanned,
    /// Market skipped by the volume gate
    MarketSkipped,
    /// Order book fetch returned an error
    OrderBookFetchFailed,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Markets held in the state store
    TrackedMarkets,
}

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full `scan_all_markets` pass
    FullScan,
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    let metric_name = match metric {
        CounterMetric::MarketScanned => "polyedge_markets_scanned_total",
        CounterMetric::MarketSkipped => "polyedge_markets_skipped_total",
        CounterMetric::OrderBookFetchFailed => "polyedge_orderbook_fetch_failures_total",
    };
    ::metrics::counter!(metric_name).increment(1);
}

/// Count a detected edge, labelled by type
pub fn record_edge(edge_type: EdgeType) {
    ::metrics::counter!("polyedge_edges_detected_total", "edge_type" => edge_type.as_str())
        .increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::TrackedMarkets => "polyedge_tracked_markets",
    };
    ::metrics::gauge!(metric_name).set(value);
}

/// Record a latency measurement in milliseconds
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::FullScan => "polyedge_scan_duration_ms",
    };
    ::metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        increment(CounterMetric::MarketScanned);
        record_edge(EdgeType::Arbitrage);
        set_gauge(GaugeMetric::TrackedMarkets, 3.0);
        record_latency(LatencyMetric::FullScan, Duration::from_millis(12));
    }
}
