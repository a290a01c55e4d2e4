use clap::Parser;
use poly_edge::cli::{Cli, Commands};
use poly_edge::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    poly_edge::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Scan(args) => {
            tracing::info!("Starting scan");
            args.execute(&config).await?;
        }
        Commands::Watch(args) => {
            tracing::info!("Starting watch mode");
            args.execute(&config).await?;
        }
        Commands::Config => {
            config.detection().validate()?;
            println!("{}", toml::to_string_pretty(&config)?);
        }
    }

    Ok(())
}
