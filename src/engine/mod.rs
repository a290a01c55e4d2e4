//! Edge detection engine
//!
//! Gates markets on volume, records each snapshot in the state store, runs
//! the four detectors in a fixed order and ranks the combined output.
//!
//! Within one market, edges come out as arbitrage, momentum, volume, then
//! order book. Across a full scan they are ranked by alpha score and
//! magnitude, with ties left in scan order.

use crate::config::{ConfigError, DetectionConfig, EngineConfig};
use crate::detector::{
    ArbitrageDetector, MomentumDetector, OrderBookDetector, VolumeAnomalyDetector,
};
use crate::edge::{rank_edges, Edge};
use crate::market::MarketSnapshot;
use crate::orderbook::OrderBook;
use crate::source::MarketDataSource;
use crate::state::{MarketStateStore, StoreConfig};
use crate::telemetry::{self, CounterMetric, GaugeMetric, LatencyMetric};
use chrono::{DateTime, Duration, Utc};
use futures_util::stream::{self, StreamExt};
use std::time::Instant;

/// Multi-strategy edge detector over a market data source
///
/// The engine is the single writer of its state store; scans take
/// `&mut self`.
pub struct EdgeEngine<S: MarketDataSource> {
    source: S,
    config: EngineConfig,
    store: MarketStateStore,
    arbitrage: ArbitrageDetector,
    momentum: MomentumDetector,
    volume: VolumeAnomalyDetector,
    orderbook: OrderBookDetector,
}

impl<S: MarketDataSource> EdgeEngine<S> {
    /// Create an engine, validating the configuration
    pub fn new(source: S, config: DetectionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let DetectionConfig {
            engine,
            arbitrage,
            momentum,
            volume,
            orderbook,
        } = config;

        Ok(Self {
            source,
            store: MarketStateStore::new(StoreConfig::from(&engine)),
            config: engine,
            arbitrage: ArbitrageDetector::new(arbitrage),
            momentum: MomentumDetector::new(momentum),
            volume: VolumeAnomalyDetector::new(volume),
            orderbook: OrderBookDetector::new(orderbook),
        })
    }

    /// Create an engine with default configuration
    pub fn with_defaults(source: S) -> Self {
        Self {
            source,
            config: EngineConfig::default(),
            store: MarketStateStore::with_defaults(),
            arbitrage: ArbitrageDetector::with_defaults(),
            momentum: MomentumDetector::with_defaults(),
            volume: VolumeAnomalyDetector::with_defaults(),
            orderbook: OrderBookDetector::with_defaults(),
        }
    }

    /// Scan one market snapshot
    ///
    /// Markets below the volume gate return no edges and leave state untouched.
    pub async fn scan_market(&mut self, snapshot: &MarketSnapshot) -> Vec<Edge> {
        let Some(edges) = self.scan_state(snapshot, Utc::now()) else {
            return Vec::new();
        };
        let book = self.fetch_book(snapshot).await;
        let edges = self.finish_market(snapshot, edges, book.as_ref());
        telemetry::set_gauge(GaugeMetric::TrackedMarkets, self.store.len() as f64);
        edges
    }

    /// Fetch up to `limit` markets, scan each and return all edges ranked
    ///
    /// Only a failure to fetch the market list is returned as an error.
    pub async fn scan_all_markets(&mut self, limit: usize) -> anyhow::Result<Vec<Edge>> {
        let started = Instant::now();
        let markets = self.source.fetch_markets(limit).await?;
        let fetched = markets.len();

        // State phase runs in scan order with a single writer
        let now = Utc::now();
        let mut pending = Vec::with_capacity(fetched);
        for snapshot in markets {
            if let Some(edges) = self.scan_state(&snapshot, now) {
                pending.push((snapshot, edges));
            }
        }

        // Book fetches may overlap; `buffered` yields them in input order
        let engine = &*self;
        let books: Vec<Option<OrderBook>> = stream::iter(
            pending
                .iter()
                .map(|(snapshot, _)| engine.fetch_book(snapshot)),
        )
        .buffered(self.config.orderbook_concurrency)
        .collect()
        .await;

        let scanned = pending.len();
        let mut all = Vec::new();
        for ((snapshot, edges), book) in pending.into_iter().zip(books) {
            all.extend(self.finish_market(&snapshot, edges, book.as_ref()));
        }
        rank_edges(&mut all);

        let elapsed = started.elapsed();
        telemetry::set_gauge(GaugeMetric::TrackedMarkets, self.store.len() as f64);
        telemetry::record_latency(LatencyMetric::FullScan, elapsed);
        tracing::info!(
            fetched,
            scanned,
            edges = all.len(),
            tracked = self.store.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "Scan complete"
        );

        Ok(all)
    }

    /// Drop markets not updated within `max_idle`
    pub fn evict_idle(&mut self, max_idle: Duration) -> usize {
        self.evict_idle_at(Utc::now(), max_idle)
    }

    /// Drop markets not updated within `max_idle` of `now`
    pub fn evict_idle_at(&mut self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let evicted = self.store.evict_idle(now, max_idle);
        telemetry::set_gauge(GaugeMetric::TrackedMarkets, self.store.len() as f64);
        evicted
    }

    /// Per-market state
    pub fn state(&self) -> &MarketStateStore {
        &self.store
    }

    /// Underlying data source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Engine settings in effect
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gate, update state and run the state-backed detectors
    ///
    /// `None` means the market was gated out.
    fn scan_state(&mut self, snapshot: &MarketSnapshot, now: DateTime<Utc>) -> Option<Vec<Edge>> {
        if snapshot.volume_24h < self.config.min_volume_usd {
            tracing::trace!(
                market = %snapshot.condition_id,
                volume = %snapshot.volume_24h,
                "Below volume gate"
            );
            telemetry::increment(CounterMetric::MarketSkipped);
            return None;
        }
        telemetry::increment(CounterMetric::MarketScanned);

        let state = self.store.update_at(snapshot, now);

        let edges: Vec<Edge> = [
            self.arbitrage.detect(snapshot),
            self.momentum.detect(snapshot, state),
            self.volume.detect(snapshot, state),
        ]
        .into_iter()
        .flatten()
        .collect();

        Some(edges)
    }

    /// Append the order book signal and count the market's edges
    fn finish_market(
        &self,
        snapshot: &MarketSnapshot,
        mut edges: Vec<Edge>,
        book: Option<&OrderBook>,
    ) -> Vec<Edge> {
        edges.extend(self.orderbook.detect(snapshot, book));

        for edge in &edges {
            telemetry::record_edge(edge.edge_type);
        }
        if !edges.is_empty() {
            tracing::debug!(
                market = %snapshot.condition_id,
                count = edges.len(),
                "Edges detected"
            );
        }
        edges
    }

    /// Fetch the YES book; errors are logged and treated as no book
    async fn fetch_book(&self, snapshot: &MarketSnapshot) -> Option<OrderBook> {
        if snapshot.yes_token_id.is_empty() {
            return None;
        }

        match self.source.fetch_order_book(&snapshot.yes_token_id).await {
            Ok(book) => book,
            Err(e) => {
                telemetry::increment(CounterMetric::OrderBookFetchFailed);
                tracing::warn!(
                    market = %snapshot.condition_id,
                    token = %snapshot.yes_token_id,
                    error = %e,
                    "Order book fetch failed"
                );
                None
            }
        }
    }
}
