//! Session bootstrap and argument helpers shared by the subcommands.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use tracing::info;

use offer_core::{Catalog, MarginTier};
use offer_session::commands::unlock_master_mode;
use offer_session::{AppConfig, CatalogSnapshot, OfferSession, SessionState};

/// Flags every session-based subcommand accepts.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Master password; unlocks cost editing and the cost summary
    #[arg(long, value_name = "PASSWORD")]
    pub unlock: Option<String>,

    /// Catalog snapshot to start from instead of the built-in catalog
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

/// Opens a session from the built-in catalog or a snapshot file, unlocking
/// it if a password was given.
///
/// A snapshot brings its own pricing parameters; otherwise they come from
/// `config`.
pub fn open_session(config: &AppConfig, args: &SessionArgs) -> Result<SessionState> {
    let (catalog, pricing) = match &args.catalog {
        Some(path) => CatalogSnapshot::load(path)
            .and_then(CatalogSnapshot::into_parts)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => (Catalog::default_implant_catalog(), config.pricing_config()),
    };

    let state = SessionState::new(OfferSession::new(catalog, pricing));

    if let Some(password) = &args.unlock {
        unlock_master_mode(&state, config, password)?;
    }

    Ok(state)
}

/// Splits `KEY=VALUE`. The value is returned raw so the session can coerce it.
pub fn parse_assignment(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => bail!("Expected KEY=VALUE, got '{}'", raw),
    }
}

/// Parses a margin band name.
///
/// Accepts `base`/`mid`/`high` or the default band labels `0-299`,
/// `300-499`, `500+`.
pub fn parse_band(raw: &str) -> Result<MarginTier> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "base" | "0-299" => Ok(MarginTier::Base),
        "mid" | "300-499" => Ok(MarginTier::Mid),
        "high" | "500+" => Ok(MarginTier::High),
        other => bail!("Unknown margin band '{}' (expected base, mid or high)", other),
    }
}

// =============================================================================
// init-config
// =============================================================================

#[derive(Args, Debug)]
pub struct InitConfigArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

pub fn init_config(path: Option<PathBuf>, args: &InitConfigArgs) -> Result<()> {
    let path = match path.or_else(AppConfig::default_config_path) {
        Some(path) => path,
        None => bail!("No config directory on this platform; pass --config PATH"),
    };

    if path.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let written = AppConfig::default().save(Some(path))?;
    info!(path = %written.display(), "Wrote default config");
    println!("{}", written.display());
    Ok(())
}
