//! Shared fixtures

use poly_edge::market::MarketSnapshot;
use poly_edge::orderbook::{OrderBook, PriceLevel};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn market(id: &str, yes: Decimal, no: Decimal, volume: Decimal) -> MarketSnapshot {
    MarketSnapshot {
        condition_id: id.to_string(),
        slug: format!("{}-slug", id),
        question: format!("Will {} happen?", id),
        yes_token_id: token(id),
        yes_price: yes,
        no_price: no,
        volume_24h: volume,
        liquidity: dec!(10000),
    }
}

pub fn token(id: &str) -> String {
    format!("{}-yes", id)
}

/// Book with `bid_size` on each of five bid levels and `ask_size` on five asks
pub fn book(id: &str, bid_size: Decimal, ask_size: Decimal) -> OrderBook {
    OrderBook::from_levels(
        token(id),
        (0..5)
            .map(|i| PriceLevel::new(dec!(0.49) - Decimal::new(i, 2), bid_size))
            .collect(),
        (0..5)
            .map(|i| PriceLevel::new(dec!(0.51) + Decimal::new(i, 2), ask_size))
            .collect(),
    )
}
