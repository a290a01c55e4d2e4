//! CLI interface for poly-edge
//!
//! Provides subcommands for:
//! - `scan`: One scan of the top markets, printing ranked edges
//! - `watch`: Repeated scans with a persistent engine
//! - `config`: Show the effective configuration

mod scan;
mod watch;

pub use scan::{OutputFormat, ScanArgs};
pub use watch::WatchArgs;

use crate::config::Config;
use crate::engine::EdgeEngine;
use crate::source::PolymarketSource;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "poly-edge")]
#[command(about = "Multi-strategy edge detection for Polymarket prediction markets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan markets once and print ranked edges
    Scan(ScanArgs),
    /// Scan repeatedly until interrupted
    Watch(WatchArgs),
    /// Show configuration
    Config,
}

/// Engine over the live Polymarket APIs
fn build_engine(config: &Config) -> anyhow::Result<EdgeEngine<PolymarketSource>> {
    let source = PolymarketSource::from_config(&config.source)?;
    Ok(EdgeEngine::new(source, config.detection())?)
}
