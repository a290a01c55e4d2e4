//! Order book state

use super::PriceLevel;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// L2 aggregated order book for a token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    /// Token identifier
    pub token_id: String,
    /// Bid levels, sorted best (highest) to worst
    pub bids: Vec<PriceLevel>,
    /// Ask levels, sorted best (lowest) to worst
    pub asks: Vec<PriceLevel>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Depth and whale statistics for one side of the book
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideSummary {
    /// Summed size of the best `depth` levels
    pub top_size: Decimal,
    /// Summed notional of whale levels
    pub whale_notional: Decimal,
    /// Number of whale levels
    pub whale_count: usize,
}

impl OrderBook {
    /// Create a new empty order book
    pub fn new(token_id: impl Into<String>) -> Self {
        Self {
            token_id: token_id.into(),
            bids: vec![],
            asks: vec![],
            updated_at: Utc::now(),
        }
    }

    /// Create a book from levels in any order, sorting each side best first
    pub fn from_levels(
        token_id: impl Into<String>,
        mut bids: Vec<PriceLevel>,
        mut asks: Vec<PriceLevel>,
    ) -> Self {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        Self {
            token_id: token_id.into(),
            bids,
            asks,
            updated_at: Utc::now(),
        }
    }

    /// Get best bid price
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.first().map(|l| l.price)
    }

    /// Get best ask price
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.first().map(|l| l.price)
    }

    /// True when either side has no levels
    pub fn is_one_sided(&self) -> bool {
        self.bids.is_empty() || self.asks.is_empty()
    }

    /// Summarise the bid side
    pub fn bid_summary(&self, depth: usize, whale_notional: Decimal) -> SideSummary {
        summarize(&self.bids, depth, whale_notional)
    }

    /// Summarise the ask side
    pub fn ask_summary(&self, depth: usize, whale_notional: Decimal) -> SideSummary {
        summarize(&self.asks, depth, whale_notional)
    }
}

/// Depth covers the best `depth` levels; the whale scan covers every level
fn summarize(levels: &[PriceLevel], depth: usize, whale_notional: Decimal) -> SideSummary {
    let top_size = levels
        .iter()
        .take(depth)
        .fold(Decimal::ZERO, |acc, l| acc.saturating_add(l.size));

    let mut summary = SideSummary {
        top_size,
        ..Default::default()
    };
    for notional in levels
        .iter()
        .map(PriceLevel::notional)
        .filter(|n| *n >= whale_notional)
    {
        summary.whale_notional = summary.whale_notional.saturating_add(notional);
        summary.whale_count += 1;
    }
    summary
}
