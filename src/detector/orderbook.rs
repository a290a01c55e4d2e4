//! Order book imbalance and whale clustering

use crate::config::OrderBookConfig;
use crate::edge::{format_usd, Confidence, Direction, Edge, EdgeType};
use crate::market::MarketSnapshot;
use crate::orderbook::OrderBook;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Reads a freshly fetched book; never touches stored state
pub struct OrderBookDetector {
    config: OrderBookConfig,
}

impl OrderBookDetector {
    pub fn new(config: OrderBookConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(OrderBookConfig::default())
    }

    /// Detect whale clustering first, then plain depth imbalance
    ///
    /// Returns `None` without a book, with an empty side, when either side's
    /// top depth sums to zero, or when the depth ratio overflows.
    pub fn detect(&self, market: &MarketSnapshot, book: Option<&OrderBook>) -> Option<Edge> {
        let c = &self.config;
        let book = book?;
        if book.is_one_sided() {
            return None;
        }

        let bids = book.bid_summary(c.depth_levels, c.whale_order_size);
        let asks = book.ask_summary(c.depth_levels, c.whale_order_size);
        if bids.top_size.is_zero() || asks.top_size.is_zero() {
            return None;
        }

        let ratio = bids.top_size.checked_div(asks.top_size)?.to_f64()?;

        // Whale clustering
        if bids.whale_count >= c.whale_cluster_threshold
            && bids.whale_notional > asks.whale_notional.saturating_mul(c.whale_dominance)
        {
            return Some(self.whale_edge(
                market,
                Direction::Yes,
                bids.whale_count,
                bids.whale_notional,
                ratio,
            ));
        }
        if asks.whale_count >= c.whale_cluster_threshold
            && asks.whale_notional > bids.whale_notional.saturating_mul(c.whale_dominance)
        {
            return Some(self.whale_edge(
                market,
                Direction::No,
                asks.whale_count,
                asks.whale_notional,
                1.0 / ratio,
            ));
        }

        // Depth imbalance
        let liquidity_score = market.liquidity_f64() / c.liquidity_divisor;
        if ratio > c.buy_pressure_ratio {
            tracing::debug!(market = %market.condition_id, ratio, "Buy pressure detected");
            let confidence = if ratio > c.strong_buy_ratio {
                Confidence::High
            } else {
                Confidence::Medium
            };
            return Some(Edge::new(
                market.clone(),
                EdgeType::OrderbookImbalance,
                format!("heavy buy pressure - {:.1}x more bids than asks", ratio),
                confidence,
                ratio * c.imbalance_weight,
                Direction::Yes,
                ratio * c.imbalance_weight + liquidity_score,
            ));
        }
        if ratio < c.sell_pressure_ratio {
            let inv_ratio = 1.0 / ratio;
            tracing::debug!(market = %market.condition_id, ratio, "Sell pressure detected");
            let confidence = if ratio < c.strong_sell_ratio {
                Confidence::High
            } else {
                Confidence::Medium
            };
            return Some(Edge::new(
                market.clone(),
                EdgeType::OrderbookImbalance,
                format!(
                    "heavy sell pressure - {:.1}x more asks than bids",
                    inv_ratio
                ),
                confidence,
                inv_ratio * c.imbalance_weight,
                Direction::No,
                inv_ratio * c.imbalance_weight + liquidity_score,
            ));
        }

        None
    }

    /// `side_ratio` is the depth ratio oriented toward the whale side
    fn whale_edge(
        &self,
        market: &MarketSnapshot,
        direction: Direction,
        count: usize,
        notional: Decimal,
        side_ratio: f64,
    ) -> Edge {
        let c = &self.config;
        let notional_f64 = notional.to_f64().unwrap_or(0.0);
        let (verb, side) = match direction {
            Direction::No => ("exiting", "asks"),
            _ => ("loading", "bids"),
        };

        tracing::debug!(
            market = %market.condition_id,
            count,
            notional = %notional,
            side,
            "Whale cluster detected"
        );

        Edge::new(
            market.clone(),
            EdgeType::WhaleActivity,
            format!(
                "smart money {}! {} whale {} (${})",
                verb,
                count,
                side,
                format_usd(notional_f64)
            ),
            Confidence::High,
            count as f64 * c.whale_count_weight + side_ratio * c.whale_ratio_weight,
            direction,
            notional_f64 / c.whale_alpha_divisor + count as f64 * c.whale_alpha_count_weight,
        )
    }
}
