//! Keyed store of market state

use super::{MarketState, PriceSample};
use crate::config::EngineConfig;
use crate::market::MarketSnapshot;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

/// Retention settings for the state store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// EWMA smoothing factor
    pub ewma_alpha: f64,
    /// Price samples kept per market
    pub max_prices: usize,
    /// Volume samples kept per market
    pub max_volumes: usize,
    /// Tracked market cap; `None` keeps every market
    pub max_markets: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ewma_alpha: 0.3,
            max_prices: 100,
            max_volumes: 20,
            max_markets: None,
        }
    }
}

impl From<&EngineConfig> for StoreConfig {
    fn from(config: &EngineConfig) -> Self {
        Self {
            ewma_alpha: config.ewma_alpha,
            max_prices: config.price_history_len,
            max_volumes: config.volume_history_len,
            max_markets: config.max_tracked_markets,
        }
    }
}

/// Owns the rolling state of every tracked market
///
/// All mutation goes through [`MarketStateStore::update_at`], so a store
/// held by one engine has exactly one writer.
pub struct MarketStateStore {
    config: StoreConfig,
    markets: HashMap<String, MarketState>,
    /// Monotonic update counter used for least-recently-updated eviction
    clock: u64,
}

impl MarketStateStore {
    /// Create an empty store
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            markets: HashMap::new(),
            clock: 0,
        }
    }

    /// Create a store with default retention
    pub fn with_defaults() -> Self {
        Self::new(StoreConfig::default())
    }

    /// Record a snapshot observed now
    pub fn update(&mut self, snapshot: &MarketSnapshot) -> &MarketState {
        self.update_at(snapshot, Utc::now())
    }

    /// Record a snapshot with an explicit observation time
    pub fn update_at(
        &mut self,
        snapshot: &MarketSnapshot,
        timestamp: DateTime<Utc>,
    ) -> &MarketState {
        self.clock += 1;

        let sample = PriceSample {
            timestamp,
            yes_price: snapshot.yes_f64(),
            no_price: snapshot.no_f64(),
        };
        let volume = snapshot.volume_f64();

        if !self.markets.contains_key(&snapshot.condition_id) {
            self.make_room();
        }

        let clock = self.clock;
        let config = &self.config;
        let state = self
            .markets
            .entry(snapshot.condition_id.clone())
            .and_modify(|state| {
                state.record(
                    sample,
                    volume,
                    config.ewma_alpha,
                    config.max_prices,
                    config.max_volumes,
                )
            })
            .or_insert_with(|| {
                tracing::debug!(market = %snapshot.condition_id, "Tracking new market");
                MarketState::new(sample, volume)
            });
        state.last_touch = clock;
        state
    }

    /// State for a market, if tracked
    pub fn get(&self, condition_id: &str) -> Option<&MarketState> {
        self.markets.get(condition_id)
    }

    /// Number of tracked markets
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    /// True when no market is tracked
    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }

    /// Drop markets not updated within `max_idle` of `now`
    ///
    /// Returns how many markets were removed.
    pub fn evict_idle(&mut self, now: DateTime<Utc>, max_idle: Duration) -> usize {
        let before = self.markets.len();
        self.markets
            .retain(|_, state| now - state.last_updated <= max_idle);
        let evicted = before - self.markets.len();
        if evicted > 0 {
            tracing::debug!(evicted, remaining = self.markets.len(), "Evicted idle markets");
        }
        evicted
    }

    /// Evict least recently updated markets until one more fits under the cap
    fn make_room(&mut self) {
        let Some(cap) = self.config.max_markets else {
            return;
        };

        while self.markets.len() >= cap {
            let Some(oldest) = self
                .markets
                .iter()
                .min_by_key(|(_, state)| state.last_touch)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            self.markets.remove(&oldest);
            tracing::debug!(market = %oldest, "Evicted least recently updated market");
        }
    }
}

impl Default for MarketStateStore {
    fn default() -> Self {
        Self::with_defaults()
    }
}
