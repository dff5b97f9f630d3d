//! # implant-offer
//!
//! Command-line front-end for the implant offer calculator.
//!
//! ## Usage
//! ```text
//! implant-offer evaluate --qty implantBody=400 --price 500
//! implant-offer evaluate --qty implantBody=400 --price 500 --unlock admin --format json
//! implant-offer catalog --unlock admin
//! implant-offer export-catalog --unlock admin --out catalog.json
//! implant-offer init-config
//! ```
//!
//! Logs go to stderr so stdout can be piped as JSON.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use offer_session::AppConfig;

mod catalog;
mod evaluate;
mod output;
mod setup;

#[derive(Parser)]
#[command(name = "implant-offer")]
#[command(
    about = "Evaluate implant offers against landed cost and tiered margins",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an offer
    #[command(alias = "e")]
    Evaluate(evaluate::EvaluateArgs),

    /// List catalog items
    #[command(alias = "c")]
    Catalog(catalog::CatalogArgs),

    /// Write the catalog and pricing parameters to a JSON file
    ExportCatalog(catalog::ExportArgs),

    /// Write a config.toml with default values
    InitConfig(setup::InitConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Evaluate(args) => evaluate::execute(&load_config(cli.config)?, args),
        Commands::Catalog(args) => catalog::execute(&load_config(cli.config)?, args),
        Commands::ExportCatalog(args) => catalog::export(&load_config(cli.config)?, args),
        Commands::InitConfig(args) => setup::init_config(cli.config, &args),
    }
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let config = AppConfig::load(path)?;
    debug!(pricing = ?config.pricing, display = ?config.display, "Config loaded");
    Ok(config)
}

/// Initializes the tracing subscriber on stderr.
///
/// `RUST_LOG` controls verbosity (default `info`); `--debug` forces `debug`.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
