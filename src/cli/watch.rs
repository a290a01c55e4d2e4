//! Watch command implementation

use super::build_engine;
use crate::config::Config;
use clap::Args;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Markets to fetch per scan (defaults to source.market_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Seconds between scans
    #[arg(short, long, default_value_t = 60)]
    pub interval_secs: u64,

    /// Edges reported per scan
    #[arg(short, long, default_value_t = 5)]
    pub top: usize,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut engine = build_engine(config)?;
        let limit = self.limit.unwrap_or(config.source.market_limit);
        let idle_ttl = config
            .engine
            .idle_ttl_secs
            .map(|secs| chrono::Duration::from_std(Duration::from_secs(secs)))
            .transpose()?;

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs.max(1)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let shutdown = tokio::signal::ctrl_c();
        tokio::pin!(shutdown);

        tracing::info!(limit, interval_secs = self.interval_secs, "Watching markets");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("Shutting down");
                    break;
                }
                _ = interval.tick() => {
                    match engine.scan_all_markets(limit).await {
                        Ok(edges) => {
                            for edge in edges.iter().take(self.top) {
                                tracing::info!(
                                    market = %edge.market.condition_id,
                                    edge_type = %edge.edge_type,
                                    alpha = edge.alpha_score,
                                    magnitude = edge.magnitude,
                                    "{}",
                                    edge.description
                                );
                                println!("{}\n", edge.alert_text());
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Market scan failed"),
                    }

                    if let Some(ttl) = idle_ttl {
                        let evicted = engine.evict_idle(ttl);
                        if evicted > 0 {
                            tracing::info!(evicted, "Dropped idle markets");
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
