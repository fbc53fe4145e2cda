use clap::Parser;
use mass_backtester::cli::{Cli, Commands};
use mass_backtester::config::Config;

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
    let _guard = mass_backtester::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Run(args) => {
            tracing::info!("Starting weekly backtest run");
            args.execute(&config).await?;
        }
        Commands::Config => {
            println!("Current configuration:");
            println!(
                "  Account: {} {:.2}, lot size {}, period {}",
                config.account.currency,
                config.account.initial_amount,
                config.account.lot_size,
                config.account.default_period
            );
            println!("  Engine timeout: {}s", config.engine.timeout_secs);
            println!("  Staging dir: {}", config.staging.resolve().display());
            println!("  Strategy params: {}", config.strategy.params.len());
        }
    }

    Ok(())
}
