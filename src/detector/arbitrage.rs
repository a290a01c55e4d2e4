//! YES + NO mispricing

use crate::config::ArbitrageConfig;
use crate::edge::{Confidence, Direction, Edge, EdgeType};
use crate::market::MarketSnapshot;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Flags markets whose two sides sum to less than a dollar
///
/// Depends on the current snapshot only.
pub struct ArbitrageDetector {
    config: ArbitrageConfig,
}

impl ArbitrageDetector {
    pub fn new(config: ArbitrageConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ArbitrageConfig::default())
    }

    /// Detect an arbitrage gap on the snapshot
    pub fn detect(&self, market: &MarketSnapshot) -> Option<Edge> {
        let total = market.yes_price + market.no_price;
        if total >= self.config.threshold {
            return None;
        }

        // Gap in cents
        let gap = (Decimal::ONE - total) * Decimal::ONE_HUNDRED;

        tracing::debug!(
            market = %market.condition_id,
            total = %total,
            gap = %gap,
            "Arbitrage gap detected"
        );

        Some(Edge::new(
            market.clone(),
            EdgeType::Arbitrage,
            format!(
                "market mispriced - {:.1}c gap detected! YES + NO = {:.0}c",
                gap,
                total * Decimal::ONE_HUNDRED
            ),
            Confidence::High,
            gap.to_f64().unwrap_or(0.0),
            Direction::Neutral,
            0.0,
        ))
    }
}
