//! poly-edge: multi-strategy edge detection for Polymarket prediction markets
//!
//! This library provides the core components for:
//! - Market discovery via the Gamma API and order books from the CLOB API
//! - Per-market rolling state (price/volume history, EWMA)
//! - Arbitrage, momentum, volume anomaly and order book detectors
//! - A scanning engine that ranks edges across markets
//! - Alert rendering, structured logging and Prometheus metrics

pub mod cli;
pub mod config;
pub mod detector;
pub mod edge;
pub mod engine;
pub mod market;
pub mod orderbook;
pub mod source;
pub mod state;
pub mod telemetry;
