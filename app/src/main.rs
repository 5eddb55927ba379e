// In app/src/main.rs

use anyhow::Result;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::Symbol;
use engine::{JsonDirProvider, SignalEngine};
use std::str::FromStr;
use std::sync::Arc;
use strategies::factory::create_strategy;
use strategies::Strategy;
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Moving-average crossover signal scanner.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs a configured strategy across a list of symbols and prints the signals.
    Scan {
        /// The name of the strategy definition in the configuration.
        #[arg(short, long)]
        strategy: String,

        /// Comma-separated symbols (e.g., "005930,000660"). Defaults to the watchlist.
        #[arg(long, value_delimiter = ',')]
        symbols: Vec<String>,
    },

    /// Lists the configured strategies and their look-back requirements.
    Strategies,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    // Parse command-line arguments.
    let cli = Cli::parse();

    let settings = app_config::load_settings()?;
    init_tracing(&settings.app.log_level);

    tracing::info!(environment = %settings.app.environment, "Starting signal scanner");

    match cli.command {
        Commands::Scan { strategy, symbols } => handle_scan(&settings, &strategy, symbols).await?,
        Commands::Strategies => handle_strategies(&settings)?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let level = tracing::Level::from_str(log_level).unwrap_or(tracing::Level::INFO);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(tracing_subscriber::filter::Targets::new().with_default(level));
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Scan" Subcommand Logic ---

async fn handle_scan(settings: &Settings, strategy_name: &str, symbols: Vec<String>) -> Result<()> {
    let definition = settings.strategy(strategy_name)?;
    let strategy: Arc<dyn Strategy> = Arc::from(create_strategy(definition)?);

    let symbols: Vec<Symbol> = if symbols.is_empty() {
        settings.scanner.watchlist.iter().map(|s| Symbol::new(s.as_str())).collect()
    } else {
        symbols.into_iter().map(Symbol::new).collect()
    };
    if symbols.is_empty() {
        anyhow::bail!("No symbols given and the watchlist is empty.");
    }

    let provider = Arc::new(JsonDirProvider::new(settings.scanner.data_dir.clone()));
    let mut engine = SignalEngine::new(strategy, provider);
    if let Some(max_concurrency) = settings.scanner.max_concurrency {
        engine = engine.with_max_concurrency(max_concurrency)?;
    }

    let report = engine.execute(&symbols).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

// --- "Strategies" Subcommand Logic ---

fn handle_strategies(settings: &Settings) -> Result<()> {
    let mut listing = Vec::with_capacity(settings.strategies.len());

    for definition in &settings.strategies {
        match create_strategy(definition) {
            Ok(strategy) => listing.push(serde_json::to_value(strategy.describe())?),
            Err(e) => {
                tracing::error!(name = %definition.name, error = %e, "Strategy definition is invalid.");
                listing.push(serde_json::json!({
                    "name": definition.name,
                    "strategy_type": definition.strategy_type,
                    "error": e.to_string(),
                }));
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&listing)?);
    Ok(())
}
