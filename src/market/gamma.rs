//! Gamma API client for market discovery
//!
//! Fetches the most active open markets from Polymarket's Gamma API and
//! converts them into [`MarketSnapshot`]s.

use super::MarketSnapshot;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;
use std::time::Duration;

/// Gamma API base URL
pub const GAMMA_API_URL: &str = "https://gamma-api.polymarket.com";

/// Configuration for the Gamma client
#[derive(Debug, Clone)]
pub struct GammaConfig {
    /// Base URL for the Gamma API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for GammaConfig {
    fn default() -> Self {
        Self {
            base_url: GAMMA_API_URL.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Client for Polymarket's Gamma API
pub struct GammaClient {
    config: GammaConfig,
    client: Client,
}

impl GammaClient {
    /// Create a new Gamma API client with default configuration
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(GammaConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: GammaConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, client })
    }

    /// Fetch up to `limit` open markets, highest 24h volume first
    ///
    /// Records that fail to decode or lack token IDs or outcome prices are
    /// skipped.
    pub async fn fetch_markets(&self, limit: usize) -> anyhow::Result<Vec<MarketSnapshot>> {
        let url = format!("{}/markets", self.config.base_url);
        let limit = limit.to_string();

        tracing::debug!(url = %url, limit = %limit, "Fetching markets from Gamma API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("active", "true"),
                ("closed", "false"),
                ("order", "volume24hr"),
                ("ascending", "false"),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Gamma API error: {} - {}", status, body);
        }

        let raw: Vec<serde_json::Value> = response.json().await?;
        let total = raw.len();
        let markets = parse_markets(raw);

        tracing::info!(
            fetched = total,
            usable = markets.len(),
            "Fetched markets from Gamma API"
        );

        Ok(markets)
    }
}

/// Raw market response from Gamma API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GammaMarket {
    condition_id: String,
    #[serde(default)]
    question: String,
    #[serde(default)]
    slug: String,
    /// JSON-encoded string array, YES first
    clob_token_ids: Option<String>,
    /// JSON-encoded string array, YES first
    outcome_prices: Option<String>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    volume24hr: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    liquidity: Option<Decimal>,
    #[serde(default, deserialize_with = "de_decimal_opt")]
    liquidity_num: Option<Decimal>,
}

/// Gamma mixes numbers and numeric strings for the same field
fn de_decimal_opt<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .map(Some)
            .map_err(serde::de::Error::custom),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        serde_json::Value::String(s) => Decimal::from_str(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Decode records one at a time, skipping any that fail
fn parse_markets(raw: Vec<serde_json::Value>) -> Vec<MarketSnapshot> {
    raw.into_iter()
        .filter_map(|value| {
            let converted = serde_json::from_value::<GammaMarket>(value)
                .map_err(anyhow::Error::from)
                .and_then(convert_to_snapshot);
            match converted {
                Ok(snapshot) => Some(snapshot),
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping unusable Gamma market");
                    None
                }
            }
        })
        .collect()
}

fn convert_to_snapshot(gamma: GammaMarket) -> anyhow::Result<MarketSnapshot> {
    let token_ids = gamma
        .clob_token_ids
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("{}: missing clobTokenIds", gamma.condition_id))?;
    let yes_token_id = parse_yes_token_id(token_ids)?;

    let prices = gamma
        .outcome_prices
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("{}: missing outcomePrices", gamma.condition_id))?;
    let (yes_price, no_price) = parse_outcome_prices(prices)?;

    Ok(MarketSnapshot {
        condition_id: gamma.condition_id,
        slug: gamma.slug,
        question: gamma.question,
        yes_token_id,
        yes_price,
        no_price,
        volume_24h: gamma.volume24hr.unwrap_or(Decimal::ZERO),
        liquidity: gamma
            .liquidity_num
            .or(gamma.liquidity)
            .unwrap_or(Decimal::ZERO),
    })
}

/// Parse the YES token from `"[\"yes\", \"no\"]"`
fn parse_yes_token_id(token_ids: &str) -> anyhow::Result<String> {
    let tokens: Vec<String> = serde_json::from_str(token_ids)
        .map_err(|e| anyhow::anyhow!("Failed to parse clobTokenIds: {} - {}", token_ids, e))?;

    if tokens.len() < 2 {
        anyhow::bail!("Expected 2 token IDs, got {}: {}", tokens.len(), token_ids);
    }

    Ok(tokens[0].clone())
}

/// Parse `"[\"0.52\", \"0.48\"]"` into (YES, NO)
fn parse_outcome_prices(prices: &str) -> anyhow::Result<(Decimal, Decimal)> {
    let raw: Vec<String> = serde_json::from_str(prices)
        .map_err(|e| anyhow::anyhow!("Failed to parse outcomePrices: {} - {}", prices, e))?;

    match raw.as_slice() {
        [yes, no, ..] => Ok((Decimal::from_str(yes)?, Decimal::from_str(no)?)),
        _ => anyhow::bail!("Expected 2 outcome prices, got {}: {}", raw.len(), prices),
    }
}
