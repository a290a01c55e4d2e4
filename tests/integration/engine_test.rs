//! Engine behaviour across repeated scans

use crate::common::{book, market, token};
use poly_edge::config::DetectionConfig;
use poly_edge::edge::{Confidence, Direction, EdgeType};
use poly_edge::engine::EdgeEngine;
use poly_edge::source::InMemorySource;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn engine(source: &InMemorySource) -> EdgeEngine<InMemorySource> {
    EdgeEngine::new(source.clone(), DetectionConfig::default()).unwrap()
}

#[tokio::test]
async fn test_momentum_builds_across_scans() {
    let source = InMemorySource::new();
    let mut engine = engine(&source);

    for yes in [dec!(0.50), dec!(0.50)] {
        source.set_markets(vec![market("m", yes, Decimal::ONE - yes, dec!(2000))]);
        assert!(engine.scan_all_markets(10).await.unwrap().is_empty());
    }

    source.set_markets(vec![market("m", dec!(0.56), dec!(0.44), dec!(2000))]);
    let edges = engine.scan_all_markets(10).await.unwrap();

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].edge_type, EdgeType::OddsMovement);
    assert_eq!(edges[0].direction, Direction::Yes);
    assert_eq!(edges[0].market.yes_price, dec!(0.56));
    assert_eq!(engine.state().get("m").unwrap().prices().len(), 3);
}

#[tokio::test]
async fn test_volume_zscore_after_history() {
    let source = InMemorySource::new();
    let mut engine = engine(&source);

    source.set_markets(vec![market("m", dec!(0.5), dec!(0.5), dec!(10000))]);
    for _ in 0..5 {
        assert!(engine.scan_all_markets(10).await.unwrap().is_empty());
    }

    source.set_markets(vec![market("m", dec!(0.5), dec!(0.5), dec!(60000))]);
    let edges = engine.scan_all_markets(10).await.unwrap();

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].edge_type, EdgeType::VolumeSpike);
    assert_eq!(edges[0].confidence, Confidence::Medium);
    assert_eq!(edges[0].direction, Direction::Neutral);
}

#[tokio::test]
async fn test_gated_markets_skip_state_and_books() {
    let source = InMemorySource::new();
    source.set_markets(vec![
        market("thin", dec!(0.40), dec!(0.40), dec!(500)),
        market("a", dec!(0.50), dec!(0.50), dec!(2000)),
        market("b", dec!(0.50), dec!(0.50), dec!(1000)),
    ]);
    let mut engine = engine(&source);

    let edges = engine.scan_all_markets(10).await.unwrap();

    // The thin market would be an arbitrage edge if it were scanned
    assert!(edges.is_empty());
    assert!(engine.state().get("thin").is_none());
    assert_eq!(engine.state().len(), 2);
    assert_eq!(source.book_requests(), vec![token("a"), token("b")]);
}

#[tokio::test]
async fn test_book_failure_does_not_stop_scan() {
    let source = InMemorySource::new();
    source.set_markets(vec![
        market("a", dec!(0.50), dec!(0.50), dec!(2000)),
        market("b", dec!(0.50), dec!(0.50), dec!(2000)),
        market("c", dec!(0.50), dec!(0.50), dec!(2000)),
    ]);
    source.fail_token(token("a"));
    source.fail_token(token("b"));
    source.insert_book(book("c", dec!(100), dec!(600)));
    let mut engine = engine(&source);

    let edges = engine.scan_all_markets(10).await.unwrap();

    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0].market.condition_id, "c");
    assert_eq!(edges[0].edge_type, EdgeType::OrderbookImbalance);
    assert_eq!(edges[0].direction, Direction::No);
    assert_eq!(source.book_requests().len(), 3);
}

#[tokio::test]
async fn test_market_list_failure_is_error() {
    struct Broken;

    #[async_trait::async_trait]
    impl poly_edge::source::MarketDataSource for Broken {
        async fn fetch_markets(
            &self,
            _limit: usize,
        ) -> anyhow::Result<Vec<poly_edge::market::MarketSnapshot>> {
            anyhow::bail!("gamma unavailable")
        }

        async fn fetch_order_book(
            &self,
            _token_id: &str,
        ) -> anyhow::Result<Option<poly_edge::orderbook::OrderBook>> {
            Ok(None)
        }
    }

    let mut engine = EdgeEngine::new(Broken, DetectionConfig::default()).unwrap();
    let err = engine.scan_all_markets(10).await.unwrap_err();
    assert!(err.to_string().contains("gamma unavailable"));
    assert!(engine.state().is_empty());
}

#[tokio::test]
async fn test_capacity_evicts_oldest_market() {
    let source = InMemorySource::new();
    source.set_markets(vec![
        market("a", dec!(0.5), dec!(0.5), dec!(2000)),
        market("b", dec!(0.5), dec!(0.5), dec!(2000)),
        market("c", dec!(0.5), dec!(0.5), dec!(2000)),
    ]);
    let mut config = DetectionConfig::default();
    config.engine.max_tracked_markets = Some(2);
    let mut engine = EdgeEngine::new(source.clone(), config).unwrap();

    engine.scan_all_markets(10).await.unwrap();

    assert_eq!(engine.state().len(), 2);
    assert!(engine.state().get("a").is_none());
    assert!(engine.state().get("b").is_some());
    assert!(engine.state().get("c").is_some());
}

#[tokio::test]
async fn test_limit_is_passed_to_source() {
    let source = InMemorySource::new();
    source.set_markets(vec![
        market("a", dec!(0.45), dec!(0.50), dec!(2000)),
        market("b", dec!(0.45), dec!(0.50), dec!(2000)),
        market("c", dec!(0.45), dec!(0.50), dec!(2000)),
    ]);
    let mut engine = engine(&source);

    let edges = engine.scan_all_markets(2).await.unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!(engine.state().len(), 2);
}
