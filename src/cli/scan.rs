//! Scan command implementation

use super::build_engine;
use crate::config::Config;
use crate::edge::Edge;
use clap::{Args, ValueEnum};

/// Output format for scan results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON array of edges
    Json,
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Markets to fetch (defaults to source.market_limit)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Edges to print
    #[arg(short, long, default_value_t = 10)]
    pub top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ScanArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mut engine = build_engine(config)?;
        let limit = self.limit.unwrap_or(config.source.market_limit);

        let edges = engine.scan_all_markets(limit).await?;
        let shown = &edges[..edges.len().min(self.top)];

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(shown)?),
            OutputFormat::Table => print!("{}", render_table(shown)),
        }
        Ok(())
    }
}

const QUESTION_WIDTH: usize = 60;

/// Render edges as a text table, one edge per two lines
pub fn render_table(edges: &[Edge]) -> String {
    if edges.is_empty() {
        return "No edges detected\n".to_string();
    }

    let mut out = format!(
        "{:>3}  {:<19} {:<7} {:<6} {:>5} {:>5}  {}\n",
        "#", "TYPE", "SIDE", "CONF", "ALPHA", "MAG", "MARKET"
    );
    for (i, edge) in edges.iter().enumerate() {
        let question: String = edge.market.question.chars().take(QUESTION_WIDTH).collect();
        out.push_str(&format!(
            "{:>3}  {:<19} {:<7} {:<6} {:>5.1} {:>5.1}  {}\n",
            i + 1,
            edge.edge_type.as_str(),
            edge.direction.to_string(),
            edge.confidence.to_string(),
            edge.alpha_score,
            edge.magnitude,
            question
        ));
        out.push_str(&format!("     {}\n", edge.description));
    }
    out
}
