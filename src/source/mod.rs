//! Market data sources
//!
//! The engine pulls market snapshots and order books through
//! [`MarketDataSource`]; network access lives entirely behind it.

mod memory;
mod polymarket;

pub use memory::InMemorySource;
pub use polymarket::PolymarketSource;

use crate::market::MarketSnapshot;
use crate::orderbook::OrderBook;
use async_trait::async_trait;

/// Trait for market data providers
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch up to `limit` current market snapshots
    async fn fetch_markets(&self, limit: usize) -> anyhow::Result<Vec<MarketSnapshot>>;
    /// Fetch the order book for a token, `None` if the venue has none
    async fn fetch_order_book(&self, token_id: &str) -> anyhow::Result<Option<OrderBook>>;
}
