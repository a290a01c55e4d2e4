//! Price momentum against the smoothed average

use crate::config::MomentumConfig;
use crate::edge::{Confidence, Direction, Edge, EdgeType};
use crate::market::MarketSnapshot;
use crate::state::MarketState;

/// Detects YES price moves from the stored history and EWMA
pub struct MomentumDetector {
    config: MomentumConfig,
}

impl MomentumDetector {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(MomentumConfig::default())
    }

    /// Detect momentum for `market`, whose snapshot is already recorded in `state`
    pub fn detect(&self, market: &MarketSnapshot, state: &MarketState) -> Option<Edge> {
        let c = &self.config;
        let history = state.prices();
        if history.len() < c.min_samples {
            return None;
        }

        let current = market.yes_f64();
        let deviation = current - state.average().yes_price;
        let raw_change = current - history.front()?.yes_price;

        // Acceleration needs at least two points in the window
        let window = c.acceleration_window;
        let momentum_score = if window >= 2 && history.len() >= window {
            let recent = state.recent_yes_prices(window);
            let n = recent.len();
            let velocity = recent[n - 1] - recent[0];
            let acceleration = (recent[n - 1] - recent[n - 2]) - (recent[1] - recent[0]);
            velocity.abs() * c.velocity_weight + acceleration.abs() * c.acceleration_weight
        } else {
            raw_change.abs() * c.velocity_weight
        };

        let triggered = raw_change.abs() >= c.min_odds_change
            || deviation.abs() >= c.min_odds_change * c.deviation_trigger_factor;
        if !triggered {
            return None;
        }

        let (label, confidence) =
            if deviation.abs() > c.strong_deviation && raw_change * deviation > 0.0 {
                ("strong momentum", Confidence::High)
            } else if momentum_score > c.accelerating_score {
                ("accelerating", Confidence::High)
            } else {
                ("moving", Confidence::Medium)
            };

        let direction = if raw_change > 0.0 {
            Direction::Yes
        } else {
            Direction::No
        };

        let change_cents = raw_change.abs() * 100.0;
        let magnitude = change_cents + momentum_score * c.magnitude_score_weight;
        let alpha = momentum_score + market.liquidity_f64() / c.liquidity_divisor;

        tracing::debug!(
            market = %market.condition_id,
            raw_change,
            deviation,
            momentum_score,
            label,
            "Momentum detected"
        );

        let sign = if raw_change > 0.0 { "+" } else { "" };
        Some(Edge::new(
            market.clone(),
            EdgeType::OddsMovement,
            format!(
                "{} - YES {}{:.1}c | velocity: {:+.1}c",
                label,
                sign,
                raw_change * 100.0,
                deviation * 100.0
            ),
            confidence,
            magnitude,
            direction,
            alpha,
        ))
    }
}
