use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wt_cli::commands::{export, random, report};
use wt_cli::{Cli, Commands, Config, input};
use wt_core::Analyzer;

/// Load config, read the history export, and build the analyzer.
fn load_analyzer(cli: &Cli) -> Result<Analyzer> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let history_path = cli.input.clone().unwrap_or_else(|| config.history_path.clone());
    let records = input::read_history(&history_path)?;

    let outcome = wt_core::load(records);
    tracing::info!(
        events = outcome.events.len(),
        dropped = outcome.dropped.total(),
        path = %history_path.display(),
        "parsed history export"
    );

    Ok(Analyzer::new(outcome.events, &config.duration_config()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Report { query, output }) => {
            let analyzer = load_analyzer(&cli)?;
            report::run(&analyzer, query, output)?;
        }
        Some(Commands::Random {
            include_month,
            output,
        }) => {
            let analyzer = load_analyzer(&cli)?;
            random::run(&analyzer, *include_month, output)?;
        }
        Some(Commands::Export { format, output }) => {
            let analyzer = load_analyzer(&cli)?;
            export::run(&analyzer, *format, output.as_deref())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
