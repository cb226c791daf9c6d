use clap::Parser;
use liquidity_terminal::cli::{Cli, Commands};
use liquidity_terminal::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        toml::from_str(include_str!("../config.toml.example")).expect("Invalid default config")
    });

    // Initialize telemetry
    let _guard = liquidity_terminal::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Analyze(args) => {
            tracing::info!(region = %args.region, "Starting analysis");
            args.execute(&config).await?;
        }
        Commands::Brief(args) => {
            tracing::info!(region = %args.region, "Generating brief");
            args.execute_brief(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  FRED base URL: {}", config.feed.fred_base_url);
            println!("  Stooq base URL: {}", config.feed.stooq_base_url);
            println!(
                "  Windows: smoothing={} normalize={} correlation={} regression={}",
                config.pipeline.smoothing_window,
                config.pipeline.normalize_window,
                config.pipeline.correlation_window,
                config.model.regression_window
            );
            println!("  History: {} days", config.pipeline.history_days);
            println!("  Cache TTL: {}s", config.cache.ttl_secs);
        }
    }

    Ok(())
}
