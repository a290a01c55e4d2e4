//! Edge types

use crate::market::MarketSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Kind of opportunity an edge signals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeType {
    /// YES + NO priced below a dollar
    Arbitrage,
    /// Price moving away from its average
    OddsMovement,
    /// 24h volume far above its history
    VolumeSpike,
    /// Resting size heavily skewed to one side of the book
    OrderbookImbalance,
    /// Cluster of large resting orders on one side
    WhaleActivity,
}

impl EdgeType {
    /// Stable lowercase name, used as a metrics label
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Arbitrage => "arbitrage",
            EdgeType::OddsMovement => "odds_movement",
            EdgeType::VolumeSpike => "volume_spike",
            EdgeType::OrderbookImbalance => "orderbook_imbalance",
            EdgeType::WhaleActivity => "whale_activity",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Detector confidence in an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Confidence::Low => "low",
            Confidence::Medium => "medium",
            Confidence::High => "high",
        })
    }
}

/// Side an edge favours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Yes,
    No,
    /// Both sides (arbitrage)
    Neutral,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Yes => "YES",
            Direction::No => "NO",
            Direction::Neutral => "NEUTRAL",
        })
    }
}

/// A detected edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge identifier
    pub id: Uuid,
    /// Snapshot the edge was detected on
    pub market: MarketSnapshot,
    pub edge_type: EdgeType,
    /// Human readable summary
    pub description: String,
    pub confidence: Confidence,
    /// How significant the edge is, 0 to 100
    pub magnitude: f64,
    pub direction: Direction,
    pub detected_at: DateTime<Utc>,
    /// Combined quality score used for ranking, 0 to 100
    pub alpha_score: f64,
}

impl Edge {
    /// Create an edge; magnitude and alpha are clamped to [0, 100]
    pub fn new(
        market: MarketSnapshot,
        edge_type: EdgeType,
        description: impl Into<String>,
        confidence: Confidence,
        magnitude: f64,
        direction: Direction,
        alpha_score: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            market,
            edge_type,
            description: description.into(),
            confidence,
            magnitude: clamp_score(magnitude),
            direction,
            detected_at: Utc::now(),
            alpha_score: clamp_score(alpha_score),
        }
    }
}

/// NaN maps to 0
fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market() -> MarketSnapshot {
        MarketSnapshot {
            condition_id: "0x1".to_string(),
            slug: "test".to_string(),
            question: "Test?".to_string(),
            yes_token_id: "yes".to_string(),
            yes_price: dec!(0.45),
            no_price: dec!(0.50),
            volume_24h: dec!(5000),
            liquidity: dec!(10000),
        }
    }

    #[test]
    fn test_edge_scores_clamped() {
        let edge = Edge::new(
            market(),
            EdgeType::VolumeSpike,
            "spike",
            Confidence::Medium,
            250.0,
            Direction::Neutral,
            -5.0,
        );
        assert_eq!(edge.magnitude, 100.0);
        assert_eq!(edge.alpha_score, 0.0);

        let edge = Edge::new(
            market(),
            EdgeType::VolumeSpike,
            "spike",
            Confidence::Medium,
            f64::NAN,
            Direction::Neutral,
            42.5,
        );
        assert_eq!(edge.magnitude, 0.0);
        assert_eq!(edge.alpha_score, 42.5);
    }

    #[test]
    fn test_edge_ids_unique() {
        let a = Edge::new(
            market(),
            EdgeType::Arbitrage,
            "a",
            Confidence::High,
            5.0,
            Direction::Neutral,
            0.0,
        );
        let b = Edge::new(
            market(),
            EdgeType::Arbitrage,
            "a",
            Confidence::High,
            5.0,
            Direction::Neutral,
            0.0,
        );
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_edge_serializes_wire_names() {
        let edge = Edge::new(
            market(),
            EdgeType::OrderbookImbalance,
            "heavy buy pressure",
            Confidence::High,
            60.0,
            Direction::Yes,
            61.0,
        );
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["edge_type"], "orderbook_imbalance");
        assert_eq!(json["confidence"], "high");
        assert_eq!(json["direction"], "YES");
        assert_eq!(json["market"]["slug"], "test");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(EdgeType::WhaleActivity.to_string(), "whale_activity");
        assert_eq!(Direction::Neutral.to_string(), "NEUTRAL");
        assert_eq!(Confidence::Medium.to_string(), "medium");
        assert!(Confidence::High > Confidence::Medium);
    }
}
