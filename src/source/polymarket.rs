//! Live Polymarket source: Gamma for markets, CLOB for books

use super::MarketDataSource;
use crate::config::SourceConfig;
use crate::market::{GammaClient, GammaConfig, MarketSnapshot};
use crate::orderbook::{ClobClient, ClobConfig, OrderBook};
use async_trait::async_trait;
use std::time::Duration;

/// Market data from the public Polymarket APIs
pub struct PolymarketSource {
    gamma: GammaClient,
    clob: ClobClient,
}

impl PolymarketSource {
    /// Create a source from its two clients
    pub fn new(gamma: GammaClient, clob: ClobClient) -> Self {
        Self { gamma, clob }
    }

    /// Create from application config
    pub fn from_config(config: &SourceConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let gamma = GammaClient::with_config(GammaConfig {
            base_url: config.gamma_url.clone(),
            timeout,
        })?;
        let clob = ClobClient::with_config(ClobConfig {
            base_url: config.clob_url.clone(),
            timeout,
        })?;
        Ok(Self::new(gamma, clob))
    }
}

#[async_trait]
impl MarketDataSource for PolymarketSource {
    async fn fetch_markets(&self, limit: usize) -> anyhow::Result<Vec<MarketSnapshot>> {
        self.gamma.fetch_markets(limit).await
    }

    async fn fetch_order_book(&self, token_id: &str) -> anyhow::Result<Option<OrderBook>> {
        self.clob.fetch_order_book(token_id).await
    }
}
