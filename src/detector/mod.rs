//! Edge detectors
//!
//! Each detector is a total function over its inputs: it either returns one
//! [`Edge`](crate::edge::Edge) or `None`, and never fails.

mod arbitrage;
mod momentum;
mod orderbook;
mod volume;

pub use arbitrage::ArbitrageDetector;
pub use momentum::MomentumDetector;
pub use orderbook::OrderBookDetector;
pub use volume::VolumeAnomalyDetector;
