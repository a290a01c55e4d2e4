//! Benchmarks for detectors and full scans

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use poly_edge::config::DetectionConfig;
use poly_edge::detector::{MomentumDetector, OrderBookDetector, VolumeAnomalyDetector};
use poly_edge::engine::EdgeEngine;
use poly_edge::market::MarketSnapshot;
use poly_edge::orderbook::{OrderBook, PriceLevel};
use poly_edge::source::InMemorySource;
use poly_edge::state::MarketStateStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn snapshot(id: &str, yes: Decimal, volume: Decimal) -> MarketSnapshot {
    MarketSnapshot {
        condition_id: id.to_string(),
        slug: id.to_string(),
        question: format!("{}?", id),
        yes_token_id: format!("{}-yes", id),
        yes_price: yes,
        no_price: Decimal::ONE - yes,
        volume_24h: volume,
        liquidity: dec!(25000),
    }
}

fn whale_book(token: &str) -> OrderBook {
    OrderBook::from_levels(
        token,
        (0..20)
            .map(|i| PriceLevel::new(dec!(0.49) - Decimal::new(i, 3), dec!(15000)))
            .collect(),
        (0..20)
            .map(|i| PriceLevel::new(dec!(0.51) + Decimal::new(i, 3), dec!(200)))
            .collect(),
    )
}

fn benchmark_state_detectors(c: &mut Criterion) {
    let mut store = MarketStateStore::with_defaults();
    for i in 0..100 {
        let yes = dec!(0.40) + Decimal::new(i % 20, 3);
        store.update(&snapshot("m", yes, dec!(10000) + Decimal::from(i * 10)));
    }
    let current = snapshot("m", dec!(0.52), dec!(90000));
    let state = store.update(&current).clone();

    let momentum = MomentumDetector::with_defaults();
    let volume = VolumeAnomalyDetector::with_defaults();

    c.bench_function("momentum_detect", |b| {
        b.iter(|| momentum.detect(black_box(&current), black_box(&state)))
    });
    c.bench_function("volume_detect", |b| {
        b.iter(|| volume.detect(black_box(&current), black_box(&state)))
    });
}

fn benchmark_orderbook_detector(c: &mut Criterion) {
    let detector = OrderBookDetector::with_defaults();
    let market = snapshot("m", dec!(0.5), dec!(10000));
    let book = whale_book("m-yes");

    c.bench_function("orderbook_detect", |b| {
        b.iter(|| detector.detect(black_box(&market), black_box(Some(&book))))
    });
}

fn benchmark_full_scan(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let source = InMemorySource::new();
    let markets: Vec<MarketSnapshot> = (0..200)
        .map(|i| snapshot(&format!("m{}", i), dec!(0.45), dec!(5000)))
        .collect();
    for market in &markets {
        source.insert_book(whale_book(&market.yes_token_id));
    }
    source.set_markets(markets);

    let mut config = DetectionConfig::default();
    config.engine.orderbook_concurrency = 8;
    let engine = tokio::sync::Mutex::new(EdgeEngine::new(source, config).unwrap());

    c.bench_function("scan_all_markets_200", |b| {
        b.to_async(&runtime)
            .iter(|| async { engine.lock().await.scan_all_markets(200).await.unwrap() })
    });
}

criterion_group!(
    benches,
    benchmark_state_detectors,
    benchmark_orderbook_detector,
    benchmark_full_scan
);
criterion_main!(benches);
