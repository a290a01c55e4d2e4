//! Fixed in-memory source for tests and benchmarks

use super::MarketDataSource;
use crate::market::MarketSnapshot;
use crate::orderbook::OrderBook;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Serves preloaded snapshots and books; individual tokens can be made to fail
#[derive(Clone, Default)]
pub struct InMemorySource {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    markets: Vec<MarketSnapshot>,
    books: HashMap<String, OrderBook>,
    failing_tokens: HashSet<String>,
    book_requests: Vec<String>,
}

impl InMemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the markets returned by `fetch_markets`
    pub fn set_markets(&self, markets: Vec<MarketSnapshot>) {
        self.write().markets = markets;
    }

    /// Serve `book` for its token
    pub fn insert_book(&self, book: OrderBook) {
        self.write().books.insert(book.token_id.clone(), book);
    }

    /// Make order book fetches for `token_id` return an error
    pub fn fail_token(&self, token_id: impl Into<String>) {
        self.write().failing_tokens.insert(token_id.into());
    }

    /// Token IDs requested so far, in request order
    pub fn book_requests(&self) -> Vec<String> {
        self.read().book_requests.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    async fn fetch_markets(&self, limit: usize) -> anyhow::Result<Vec<MarketSnapshot>> {
        Ok(self.read().markets.iter().take(limit).cloned().collect())
    }

    async fn fetch_order_book(&self, token_id: &str) -> anyhow::Result<Option<OrderBook>> {
        let mut inner = self.write();
        inner.book_requests.push(token_id.to_string());
        if inner.failing_tokens.contains(token_id) {
            anyhow::bail!("order book unavailable for {}", token_id);
        }
        Ok(inner.books.get(token_id).cloned())
    }
}
