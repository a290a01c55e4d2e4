//! Order book module
//!
//! Order book snapshots fetched from the Polymarket CLOB REST API

mod book;
mod client;

pub use book::{OrderBook, SideSummary};
pub use client::{ClobClient, ClobConfig, CLOB_API_URL};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price level in the order book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Price at this level
    pub price: Decimal,
    /// Total size available
    pub size: Decimal,
}

impl PriceLevel {
    /// Create a price level
    pub fn new(price: Decimal, size: Decimal) -> Self {
        Self { price, size }
    }

    /// USD value resting at this level (price * size), saturating at `Decimal::MAX`
    pub fn notional(&self) -> Decimal {
        self.price.saturating_mul(self.size)
    }
}
