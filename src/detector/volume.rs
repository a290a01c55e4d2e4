//! Volume anomalies via z-score

use crate::config::VolumeConfig;
use crate::edge::{format_usd, Confidence, Direction, Edge, EdgeType};
use crate::market::MarketSnapshot;
use crate::state::MarketState;

/// Flags 24h volume far above the market's own history
pub struct VolumeAnomalyDetector {
    config: VolumeConfig,
}

impl VolumeAnomalyDetector {
    pub fn new(config: VolumeConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(VolumeConfig::default())
    }

    /// Detect a spike against the volume history stored in `state`
    pub fn detect(&self, market: &MarketSnapshot, state: &MarketState) -> Option<Edge> {
        let history: Vec<f64> = state.volumes().iter().copied().collect();
        self.detect_with_history(market, &history)
    }

    /// Detect a spike against an explicit volume history, oldest first
    pub fn detect_with_history(&self, market: &MarketSnapshot, history: &[f64]) -> Option<Edge> {
        if history.len() >= self.config.min_history {
            self.detect_zscore(market, history)
        } else {
            self.detect_cold_start(market)
        }
    }

    fn detect_zscore(&self, market: &MarketSnapshot, history: &[f64]) -> Option<Edge> {
        let c = &self.config;
        let current = market.volume_f64();

        let n = history.len() as f64;
        let mean = history.iter().sum::<f64>() / n;
        let variance = history.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = if variance > 0.0 {
            variance.sqrt()
        } else {
            mean * c.fallback_std_share
        };
        let z = if std > 0.0 { (current - mean) / std } else { 0.0 };

        if z <= c.z_threshold {
            return None;
        }

        let spike_factor = if mean > 0.0 { current / mean } else { 1.0 };
        let (label, confidence) = if z > c.z_massive {
            ("massive volume anomaly", Confidence::High)
        } else if z > c.z_significant {
            ("significant volume spike", Confidence::High)
        } else {
            ("volume spike", Confidence::Medium)
        };

        tracing::debug!(
            market = %market.condition_id,
            z,
            mean,
            spike_factor,
            "Volume anomaly detected"
        );

        Some(Edge::new(
            market.clone(),
            EdgeType::VolumeSpike,
            format!(
                "{}! ${} (z={:.1}, {:.1}x avg)",
                label,
                format_usd(current),
                z,
                spike_factor
            ),
            confidence,
            z * c.magnitude_per_z,
            Direction::Neutral,
            z * c.alpha_per_z + market.liquidity_f64() / c.liquidity_divisor,
        ))
    }

    /// Too little history for statistics: compare against a liquidity baseline
    fn detect_cold_start(&self, market: &MarketSnapshot) -> Option<Edge> {
        let c = &self.config;
        let current = market.volume_f64();
        let baseline =
            (market.liquidity_f64() * c.cold_start_liquidity_share).max(c.cold_start_floor_usd);

        if current <= baseline * c.cold_start_multiple {
            return None;
        }

        let spike_factor = current / baseline;

        tracing::debug!(
            market = %market.condition_id,
            baseline,
            spike_factor,
            "Cold start volume spike detected"
        );

        let score = spike_factor * c.cold_start_score_per_factor;
        Some(Edge::new(
            market.clone(),
            EdgeType::VolumeSpike,
            format!(
                "volume spike! ${} in 24h ({:.1}x normal)",
                format_usd(current),
                spike_factor
            ),
            Confidence::Medium,
            score,
            Direction::Neutral,
            score,
        ))
    }
}
