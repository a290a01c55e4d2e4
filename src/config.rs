//! Configuration types for poly-edge

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub arbitrage: ArbitrageConfig,
    #[serde(default)]
    pub momentum: MomentumConfig,
    #[serde(default)]
    pub volume: VolumeConfig,
    #[serde(default)]
    pub orderbook: OrderBookConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Everything the edge engine needs, grouped per detector
#[derive(Debug, Clone, Default)]
pub struct DetectionConfig {
    pub engine: EngineConfig,
    pub arbitrage: ArbitrageConfig,
    pub momentum: MomentumConfig,
    pub volume: VolumeConfig,
    pub orderbook: OrderBookConfig,
}

/// Market data source endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Gamma API base URL (market discovery)
    pub gamma_url: String,
    /// CLOB API base URL (order books)
    pub clob_url: String,
    /// Per-request timeout
    pub timeout_secs: u64,
    /// Default number of markets fetched per scan
    pub market_limit: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            gamma_url: crate::market::GAMMA_API_URL.to_string(),
            clob_url: crate::orderbook::CLOB_API_URL.to_string(),
            timeout_secs: 10,
            market_limit: 50,
        }
    }
}

/// Engine-level gating and state retention
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Markets below this 24h volume are skipped without touching state
    pub min_volume_usd: Decimal,
    /// EWMA smoothing factor (higher = more reactive)
    pub ewma_alpha: f64,
    /// Price samples kept per market
    pub price_history_len: usize,
    /// Volume samples kept per market
    pub volume_history_len: usize,
    /// Cap on tracked market identities (least recently updated evicted first)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tracked_markets: Option<usize>,
    /// Drop markets not updated for this long (applied by the watch loop)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idle_ttl_secs: Option<u64>,
    /// Order books fetched in parallel during a full scan
    pub orderbook_concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_volume_usd: dec!(1000),
            ewma_alpha: 0.3,
            price_history_len: 100,
            volume_history_len: 20,
            max_tracked_markets: None,
            idle_ttl_secs: None,
            orderbook_concurrency: 1,
        }
    }
}

/// YES + NO mispricing detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArbitrageConfig {
    /// YES + NO below this total is flagged (0.98 = 98 cents)
    pub threshold: Decimal,
}

impl Default for ArbitrageConfig {
    fn default() -> Self {
        Self {
            threshold: dec!(0.98),
        }
    }
}

/// Price momentum detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MomentumConfig {
    /// Minimum YES move from the oldest stored sample (0.05 = 5 cents)
    pub min_odds_change: f64,
    /// Samples needed before any momentum signal
    pub min_samples: usize,
    /// Recent samples used for velocity/acceleration
    pub acceleration_window: usize,
    /// Deviation from EWMA that also triggers, as a share of `min_odds_change`
    pub deviation_trigger_factor: f64,
    /// Deviation above which a move in the same direction is "strong momentum"
    pub strong_deviation: f64,
    pub velocity_weight: f64,
    pub acceleration_weight: f64,
    /// Momentum score above which a move is "accelerating"
    pub accelerating_score: f64,
    /// Share of the momentum score added to magnitude
    pub magnitude_score_weight: f64,
    /// Liquidity (USD) worth one alpha point
    pub liquidity_divisor: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            min_odds_change: 0.05,
            min_samples: 3,
            acceleration_window: 5,
            deviation_trigger_factor: 0.7,
            strong_deviation: 0.03,
            velocity_weight: 100.0,
            acceleration_weight: 50.0,
            accelerating_score: 15.0,
            magnitude_score_weight: 0.5,
            liquidity_divisor: 10_000.0,
        }
    }
}

/// Volume anomaly detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeConfig {
    /// Samples needed for the z-score path (cold-start heuristic below this)
    pub min_history: usize,
    pub z_threshold: f64,
    pub z_significant: f64,
    pub z_massive: f64,
    /// Standard deviation used when the history has zero variance, as a share of the mean
    pub fallback_std_share: f64,
    pub magnitude_per_z: f64,
    pub alpha_per_z: f64,
    /// Liquidity (USD) worth one alpha point
    pub liquidity_divisor: f64,
    /// Cold-start baseline as a share of liquidity
    pub cold_start_liquidity_share: f64,
    /// Cold-start baseline floor (USD)
    pub cold_start_floor_usd: f64,
    /// Volume must exceed baseline by this multiple on cold start
    pub cold_start_multiple: f64,
    pub cold_start_score_per_factor: f64,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            min_history: 5,
            z_threshold: 2.0,
            z_significant: 2.5,
            z_massive: 3.5,
            fallback_std_share: 0.5,
            magnitude_per_z: 25.0,
            alpha_per_z: 20.0,
            liquidity_divisor: 5_000.0,
            cold_start_liquidity_share: 0.1,
            cold_start_floor_usd: 5_000.0,
            cold_start_multiple: 3.0,
            cold_start_score_per_factor: 10.0,
        }
    }
}

/// Order book imbalance and whale detection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderBookConfig {
    /// Level notional (price * size) at or above this is a whale order
    pub whale_order_size: Decimal,
    /// Whale levels on one side needed for a clustering signal
    pub whale_cluster_threshold: usize,
    /// Levels per side summed for the bid/ask ratio
    pub depth_levels: usize,
    /// Whale notional must exceed the other side's by this multiple
    pub whale_dominance: Decimal,
    pub whale_count_weight: f64,
    pub whale_ratio_weight: f64,
    /// Whale notional (USD) worth one alpha point
    pub whale_alpha_divisor: f64,
    pub whale_alpha_count_weight: f64,
    pub buy_pressure_ratio: f64,
    pub strong_buy_ratio: f64,
    pub sell_pressure_ratio: f64,
    pub strong_sell_ratio: f64,
    pub imbalance_weight: f64,
    /// Liquidity (USD) worth one alpha point
    pub liquidity_divisor: f64,
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            whale_order_size: dec!(5000),
            whale_cluster_threshold: 3,
            depth_levels: 5,
            whale_dominance: dec!(2),
            whale_count_weight: 20.0,
            whale_ratio_weight: 10.0,
            whale_alpha_divisor: 1_000.0,
            whale_alpha_count_weight: 10.0,
            buy_pressure_ratio: 3.0,
            strong_buy_ratio: 5.0,
            sell_pressure_ratio: 0.33,
            strong_sell_ratio: 0.2,
            imbalance_weight: 15.0,
            liquidity_divisor: 10_000.0,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: crate::telemetry::LogFormat,
    /// Prometheus exporter port; no exporter when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_port: Option<u16>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: crate::telemetry::LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

/// Invalid configuration value
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Value outside its allowed range
    #[error("{field} must be in {range}, got {value}")]
    OutOfRange {
        field: &'static str,
        range: &'static str,
        value: String,
    },
    /// Two settings contradict each other
    #[error("{0}")]
    Inconsistent(String),
}

fn out_of_range(field: &'static str, range: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::OutOfRange {
        field,
        range,
        value: value.to_string(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(out_of_range(field, "(0, inf)", value))
    }
}

fn at_least(
    field: &'static str,
    min: usize,
    range: &'static str,
    value: usize,
) -> Result<(), ConfigError> {
    if value >= min {
        Ok(())
    } else {
        Err(out_of_range(field, range, value))
    }
}

impl DetectionConfig {
    /// Reject values that would make the detectors meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let e = &self.engine;
        if e.min_volume_usd < Decimal::ZERO {
            return Err(out_of_range(
                "engine.min_volume_usd",
                "[0, inf)",
                e.min_volume_usd,
            ));
        }
        if !(e.ewma_alpha > 0.0 && e.ewma_alpha <= 1.0) {
            return Err(out_of_range("engine.ewma_alpha", "(0, 1]", e.ewma_alpha));
        }
        at_least(
            "engine.price_history_len",
            1,
            "[1, inf)",
            e.price_history_len,
        )?;
        at_least(
            "engine.volume_history_len",
            1,
            "[1, inf)",
            e.volume_history_len,
        )?;
        at_least(
            "engine.orderbook_concurrency",
            1,
            "[1, inf)",
            e.orderbook_concurrency,
        )?;
        if let Some(cap) = e.max_tracked_markets {
            at_least("engine.max_tracked_markets", 1, "[1, inf)", cap)?;
        }

        let a = &self.arbitrage;
        if a.threshold <= Decimal::ZERO || a.threshold > Decimal::TWO {
            return Err(out_of_range("arbitrage.threshold", "(0, 2]", a.threshold));
        }

        let m = &self.momentum;
        positive("momentum.min_odds_change", m.min_odds_change)?;
        at_least("momentum.min_samples", 2, "[2, inf)", m.min_samples)?;
        at_least(
            "momentum.acceleration_window",
            2,
            "[2, inf)",
            m.acceleration_window,
        )?;
        positive(
            "momentum.deviation_trigger_factor",
            m.deviation_trigger_factor,
        )?;
        positive("momentum.strong_deviation", m.strong_deviation)?;
        positive("momentum.velocity_weight", m.velocity_weight)?;
        positive("momentum.acceleration_weight", m.acceleration_weight)?;
        positive("momentum.accelerating_score", m.accelerating_score)?;
        positive("momentum.magnitude_score_weight", m.magnitude_score_weight)?;
        positive("momentum.liquidity_divisor", m.liquidity_divisor)?;
        if e.price_history_len < m.acceleration_window.max(m.min_samples) {
            return Err(ConfigError::Inconsistent(format!(
                "engine.price_history_len ({}) is shorter than the momentum window ({})",
                e.price_history_len,
                m.acceleration_window.max(m.min_samples)
            )));
        }

        let v = &self.volume;
        at_least("volume.min_history", 2, "[2, inf)", v.min_history)?;
        positive("volume.z_threshold", v.z_threshold)?;
        if !(v.z_threshold <= v.z_significant && v.z_significant <= v.z_massive) {
            return Err(ConfigError::Inconsistent(
                "volume z thresholds must satisfy z_threshold <= z_significant <= z_massive"
                    .to_string()
            ));
        }
        positive("volume.fallback_std_share", v.fallback_std_share)?;
        positive("volume.magnitude_per_z", v.magnitude_per_z)?;
        positive("volume.alpha_per_z", v.alpha_per_z)?;
        positive("volume.liquidity_divisor", v.liquidity_divisor)?;
        positive(
            "volume.cold_start_liquidity_share",
            v.cold_start_liquidity_share,
        )?;
        positive("volume.cold_start_floor_usd", v.cold_start_floor_usd)?;
        positive("volume.cold_start_multiple", v.cold_start_multiple)?;
        positive(
            "volume.cold_start_score_per_factor",
            v.cold_start_score_per_factor,
        )?;
        if e.volume_history_len < v.min_history {
            return Err(ConfigError::Inconsistent(format!(
                "engine.volume_history_len ({}) is shorter than volume.min_history ({})",
                e.volume_history_len, v.min_history
            )));
        }

        let o = &self.orderbook;
        if o.whale_order_size <= Decimal::ZERO {
            return Err(out_of_range(
                "orderbook.whale_order_size",
                "(0, inf)",
                o.whale_order_size,
            ));
        }
        if o.whale_dominance <= Decimal::ZERO {
            return Err(out_of_range(
                "orderbook.whale_dominance",
                "(0, inf)",
                o.whale_dominance,
            ));
        }
        at_least(
            "orderbook.whale_cluster_threshold",
            1,
            "[1, inf)",
            o.whale_cluster_threshold,
        )?;
        at_least("orderbook.depth_levels", 1, "[1, inf)", o.depth_levels)?;
        positive("orderbook.whale_count_weight", o.whale_count_weight)?;
        positive("orderbook.whale_ratio_weight", o.whale_ratio_weight)?;
        positive("orderbook.whale_alpha_divisor", o.whale_alpha_divisor)?;
        positive(
            "orderbook.whale_alpha_count_weight",
            o.whale_alpha_count_weight,
        )?;
        positive("orderbook.imbalance_weight", o.imbalance_weight)?;
        positive("orderbook.liquidity_divisor", o.liquidity_divisor)?;
        positive("orderbook.sell_pressure_ratio", o.sell_pressure_ratio)?;
        positive("orderbook.strong_sell_ratio", o.strong_sell_ratio)?;
        if !(o.strong_sell_ratio <= o.sell_pressure_ratio
            && o.sell_pressure_ratio < 1.0
            && 1.0 < o.buy_pressure_ratio
            && o.buy_pressure_ratio <= o.strong_buy_ratio)
        {
            return Err(ConfigError::Inconsistent(
                "orderbook ratios must satisfy strong_sell <= sell_pressure < 1 < buy_pressure <= strong_buy"
                    .to_string(),
            ));
        }

        Ok(())
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Detector settings handed to the engine
    pub fn detection(&self) -> DetectionConfig {
        DetectionConfig {
            engine: self.engine.clone(),
            arbitrage: self.arbitrage.clone(),
            momentum: self.momentum.clone(),
            volume: self.volume.clone(),
            orderbook: self.orderbook.clone(),
        }
    }
}
