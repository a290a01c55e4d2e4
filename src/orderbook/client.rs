//! Polymarket CLOB REST client for order book snapshots

use super::{OrderBook, PriceLevel};
use chrono::{TimeZone, Utc};
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;

/// Polymarket CLOB REST API base URL
pub const CLOB_API_URL: &str = "https://clob.polymarket.com";

/// Configuration for the CLOB client
#[derive(Debug, Clone)]
pub struct ClobConfig {
    /// Base URL (defaults to CLOB_API_URL)
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for ClobConfig {
    fn default() -> Self {
        Self {
            base_url: CLOB_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Fetches one-shot order book snapshots by token ID
pub struct ClobClient {
    config: ClobConfig,
    client: Client,
}

impl ClobClient {
    /// Create a new CLOB client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(ClobConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClobConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Fetch the current book for a token
    ///
    /// Returns `Ok(None)` when the CLOB has no book for the token.
    pub async fn fetch_order_book(&self, token_id: &str) -> anyhow::Result<Option<OrderBook>> {
        let url = format!("{}/book", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("token_id", token_id)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(token_id, "No order book for token");
            return Ok(None);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("CLOB API error: {} - {}", status, body);
        }

        let book: BookResponse = response.json().await?;
        let order_book = book_response_to_orderbook(book, token_id);

        tracing::trace!(
            token_id,
            bid_count = order_book.bids.len(),
            ask_count = order_book.asks.len(),
            best_bid = ?order_book.best_bid(),
            best_ask = ?order_book.best_ask(),
            "Fetched order book"
        );

        Ok(Some(order_book))
    }
}

/// Order book snapshot from the `/book` endpoint
#[derive(Debug, Deserialize)]
struct BookResponse {
    #[serde(default)]
    asset_id: String,
    #[serde(default)]
    bids: Vec<BookLevel>,
    #[serde(default)]
    asks: Vec<BookLevel>,
    #[serde(default)]
    timestamp: String,
}

/// Price level as returned by the CLOB (decimal strings)
#[derive(Debug, Deserialize)]
struct BookLevel {
    price: String,
    size: String,
}

fn parse_levels(levels: Vec<BookLevel>) -> Vec<PriceLevel> {
    levels
        .into_iter()
        .filter_map(|level| {
            let price = Decimal::from_str(&level.price).ok()?;
            let size = Decimal::from_str(&level.size).ok()?;
            Some(PriceLevel { price, size })
        })
        .collect()
}

/// The CLOB lists bids worst-first; normalise both sides to best-first
fn book_response_to_orderbook(book: BookResponse, requested_token: &str) -> OrderBook {
    let token_id = if book.asset_id.is_empty() {
        requested_token.to_string()
    } else {
        book.asset_id
    };

    let mut order_book =
        OrderBook::from_levels(token_id, parse_levels(book.bids), parse_levels(book.asks));

    // Timestamp is milliseconds since epoch
    if let Some(ts) = book
        .timestamp
        .parse::<i64>()
        .ok()
        .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
    {
        order_book.updated_at = ts;
    }

    order_book
}
