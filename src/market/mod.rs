//! Market discovery module
//!
//! Snapshots of Polymarket binary markets, fetched from the Gamma API

mod gamma;

pub use gamma::{GammaClient, GammaConfig, GAMMA_API_URL};

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Point-in-time view of one binary market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// Condition identifier, stable across snapshots
    pub condition_id: String,
    /// URL slug on polymarket.com
    pub slug: String,
    /// Market question
    pub question: String,
    /// YES token identifier (order book key)
    pub yes_token_id: String,
    /// YES price (0.0 to 1.0)
    pub yes_price: Decimal,
    /// NO price (0.0 to 1.0)
    pub no_price: Decimal,
    /// Trailing 24h volume in USD
    pub volume_24h: Decimal,
    /// Resting liquidity in USD
    pub liquidity: Decimal,
}

impl MarketSnapshot {
    /// YES price as a float for the statistical detectors
    pub fn yes_f64(&self) -> f64 {
        self.yes_price.to_f64().unwrap_or(0.0)
    }

    /// NO price as a float
    pub fn no_f64(&self) -> f64 {
        self.no_price.to_f64().unwrap_or(0.0)
    }

    /// 24h volume as a float
    pub fn volume_f64(&self) -> f64 {
        self.volume_24h.to_f64().unwrap_or(0.0)
    }

    /// Liquidity as a float
    pub fn liquidity_f64(&self) -> f64 {
        self.liquidity.to_f64().unwrap_or(0.0)
    }
}
