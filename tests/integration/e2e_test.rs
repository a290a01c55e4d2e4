//! End-to-end integration tests

use crate::common::{book, market};
use poly_edge::config::{Config, DetectionConfig};
use poly_edge::edge::{Edge, EdgeType};
use poly_edge::engine::EdgeEngine;
use poly_edge::market::MarketSnapshot;
use poly_edge::orderbook::{OrderBook, PriceLevel};
use poly_edge::source::InMemorySource;
use rust_decimal_macros::dec;

#[test]
fn test_config_example_is_valid() {
    let config: Config = toml::from_str(include_str!("../../config.toml.example")).unwrap();
    assert!(config.detection().validate().is_ok());
    assert_eq!(config.engine.orderbook_concurrency, 4);
    assert_eq!(config.arbitrage.threshold, dec!(0.98));
}

/// Ten markets mixing every edge type
fn fixture() -> (Vec<MarketSnapshot>, Vec<OrderBook>) {
    let mut markets = Vec::new();
    let mut books = Vec::new();

    for i in 0..10 {
        let id = format!("m{}", i);
        let snapshot = match i % 4 {
            0 => market(&id, dec!(0.45), dec!(0.50), dec!(2000)),
            1 => market(&id, dec!(0.50), dec!(0.50), dec!(40000)),
            _ => market(&id, dec!(0.50), dec!(0.50), dec!(2000)),
        };
        markets.push(snapshot);

        match i % 3 {
            0 => books.push(book(&id, dec!(400), dec!(100))),
            1 => books.push(book(&id, dec!(100), dec!(700))),
            _ => {
                // Whale bids: three levels of $6,000 notional
                let bids = vec![PriceLevel::new(dec!(0.5), dec!(12000)); 3];
                let asks = vec![PriceLevel::new(dec!(0.52), dec!(100)); 5];
                books.push(OrderBook::from_levels(format!("{}-yes", id), bids, asks));
            }
        }
    }
    (markets, books)
}

async fn scan_with_concurrency(concurrency: usize) -> Vec<Edge> {
    let (markets, books) = fixture();
    let source = InMemorySource::new();
    source.set_markets(markets);
    for b in books {
        source.insert_book(b);
    }

    let mut config = DetectionConfig::default();
    config.engine.orderbook_concurrency = concurrency;
    let mut engine = EdgeEngine::new(source, config).unwrap();
    engine.scan_all_markets(100).await.unwrap()
}

fn summary(edges: &[Edge]) -> Vec<(String, EdgeType, u64)> {
    edges
        .iter()
        .map(|e| (e.market.condition_id.clone(), e.edge_type, e.alpha_score.to_bits()))
        .collect()
}

#[tokio::test]
async fn test_full_scan_is_ranked() {
    let edges = scan_with_concurrency(1).await;

    assert!(!edges.is_empty());
    for pair in edges.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.alpha_score > b.alpha_score
                || (a.alpha_score == b.alpha_score && a.magnitude >= b.magnitude)
        );
        assert!((0.0..=100.0).contains(&a.alpha_score));
        assert!((0.0..=100.0).contains(&a.magnitude));
    }

    let types: Vec<EdgeType> = edges.iter().map(|e| e.edge_type).collect();
    assert!(types.contains(&EdgeType::Arbitrage));
    assert!(types.contains(&EdgeType::VolumeSpike));
    assert!(types.contains(&EdgeType::OrderbookImbalance));
    assert!(types.contains(&EdgeType::WhaleActivity));
}

#[tokio::test]
async fn test_equal_scores_keep_scan_order() {
    let edges = scan_with_concurrency(1).await;

    // Arbitrage edges all score alpha 0 and magnitude 5, so they stay in scan order
    let arbitrage: Vec<&str> = edges
        .iter()
        .filter(|e| e.edge_type == EdgeType::Arbitrage)
        .map(|e| e.market.condition_id.as_str())
        .collect();
    assert_eq!(arbitrage, vec!["m0", "m4", "m8"]);
}

#[tokio::test]
async fn test_concurrent_book_fetch_matches_sequential() {
    let sequential = scan_with_concurrency(1).await;
    let concurrent = scan_with_concurrency(4).await;
    assert_eq!(summary(&sequential), summary(&concurrent));
}

#[tokio::test]
async fn test_edges_render_alerts() {
    let edges = scan_with_concurrency(1).await;
    for edge in &edges {
        let text = edge.alert_text();
        assert!(text.starts_with(edge.headline()));
        assert!(
            text.ends_with(&format!("polymarket.com/event/{}", edge.market.slug))
        );
    }

    let json = serde_json::to_string(&edges).unwrap();
    let parsed: Vec<Edge> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.len(), edges.len());
    assert_eq!(parsed[0].id, edges[0].id);
}
