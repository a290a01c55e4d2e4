//! Plain-text alert rendering

use super::{Direction, Edge, EdgeType};
use rust_decimal::Decimal;

const MAX_QUESTION_CHARS: usize = 180;

impl Edge {
    /// Short headline for the edge type
    pub fn headline(&self) -> &'static str {
        match self.edge_type {
            EdgeType::Arbitrage => "free money alert",
            EdgeType::OddsMovement => "big move detected",
            EdgeType::VolumeSpike => "money flowing in",
            EdgeType::OrderbookImbalance => "smart money signal",
            EdgeType::WhaleActivity => "edge detected",
        }
    }

    /// Multi-line alert suitable for posting
    pub fn alert_text(&self) -> String {
        let question: String = self
            .market
            .question
            .chars()
            .take(MAX_QUESTION_CHARS)
            .collect();

        let price_line = match self.direction {
            Direction::Yes => format!("^ YES @ {}c", cents(self.market.yes_price)),
            Direction::No => format!("v NO @ {}c", cents(self.market.no_price)),
            Direction::Neutral => format!(
                "current: YES {}c / NO {}c",
                cents(self.market.yes_price),
                cents(self.market.no_price)
            ),
        };

        let link = format!("polymarket.com/event/{}", self.market.slug);

        [
            self.headline(),
            "",
            question.as_str(),
            "",
            price_line.as_str(),
            "",
            self.description.as_str(),
            "",
            link.as_str(),
        ]
        .join("\n")
    }
}

/// Price in whole cents, half to even
fn cents(price: Decimal) -> Decimal {
    (price * Decimal::ONE_HUNDRED).round()
}

/// Whole dollars with thousands separators, e.g. `12,345`
pub(crate) fn format_usd(amount: f64) -> String {
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0.0 && rounded > 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
