//! Per-market rolling state
//!
//! Bounded price/volume history plus an exponentially weighted average of
//! price for every market identity the engine has seen.

mod store;

pub use store::{MarketStateStore, StoreConfig};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One observed price pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    pub timestamp: DateTime<Utc>,
    pub yes_price: f64,
    pub no_price: f64,
}

/// Exponentially smoothed YES/NO prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragePrice {
    pub yes_price: f64,
    pub no_price: f64,
}

impl AveragePrice {
    /// Fold one observation into the average: `alpha * x + (1 - alpha) * avg`
    pub fn update(&mut self, alpha: f64, yes_price: f64, no_price: f64) {
        self.yes_price = alpha * yes_price + (1.0 - alpha) * self.yes_price;
        self.no_price = alpha * no_price + (1.0 - alpha) * self.no_price;
    }
}

/// Rolling state for a single market
#[derive(Debug, Clone)]
pub struct MarketState {
    prices: VecDeque<PriceSample>,
    volumes: VecDeque<f64>,
    average: AveragePrice,
    last_updated: DateTime<Utc>,
    /// Store-wide update counter value at the last update (recency order)
    last_touch: u64,
}

impl MarketState {
    /// Start tracking from a first observation
    fn new(sample: PriceSample, volume: f64) -> Self {
        let mut prices = VecDeque::new();
        prices.push_back(sample);
        let mut volumes = VecDeque::new();
        volumes.push_back(volume);

        Self {
            prices,
            volumes,
            average: AveragePrice {
                yes_price: sample.yes_price,
                no_price: sample.no_price,
            },
            last_updated: sample.timestamp,
            last_touch: 0,
        }
    }

    /// Append an observation and trim to the caps, oldest first
    fn record(
        &mut self,
        sample: PriceSample,
        volume: f64,
        alpha: f64,
        max_prices: usize,
        max_volumes: usize,
    ) {
        self.prices.push_back(sample);
        while self.prices.len() > max_prices {
            self.prices.pop_front();
        }

        self.volumes.push_back(volume);
        while self.volumes.len() > max_volumes {
            self.volumes.pop_front();
        }

        self.average.update(alpha, sample.yes_price, sample.no_price);
        self.last_updated = sample.timestamp;
    }

    /// Price history, oldest first
    pub fn prices(&self) -> &VecDeque<PriceSample> {
        &self.prices
    }

    /// Volume history (USD), oldest first
    pub fn volumes(&self) -> &VecDeque<f64> {
        &self.volumes
    }

    /// Current smoothed prices
    pub fn average(&self) -> AveragePrice {
        self.average
    }

    /// Timestamp of the most recent update
    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// The most recent `n` YES prices, oldest first (fewer if history is shorter)
    pub fn recent_yes_prices(&self, n: usize) -> Vec<f64> {
        let skip = self.prices.len().saturating_sub(n);
        self.prices.iter().skip(skip).map(|s| s.yes_price).collect()
    }
}
