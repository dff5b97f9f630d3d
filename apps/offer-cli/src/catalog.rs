//! `implant-offer catalog` and `implant-offer export-catalog`

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use offer_session::commands::{export_catalog, get_catalog};
use offer_session::AppConfig;

use crate::output::{self, OutputFormat};
use crate::setup::{self, SessionArgs};

#[derive(Args, Debug)]
#[command(about = "List catalog items (unit costs only in master mode)")]
pub struct CatalogArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(config: &AppConfig, args: CatalogArgs) -> Result<()> {
    let state = setup::open_session(config, &args.session)?;
    let view = get_catalog(&state);

    match args.format {
        OutputFormat::Json => println!("{}", output::to_json(&view)?),
        OutputFormat::Human => {
            print!("{}", output::render_catalog(&view, &config.display)?)
        }
    }

    Ok(())
}

#[derive(Args, Debug)]
#[command(about = "Write the catalog and pricing parameters to a JSON file")]
pub struct ExportArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Destination file
    #[arg(long, value_name = "FILE")]
    pub out: PathBuf,
}

pub fn export(config: &AppConfig, args: ExportArgs) -> Result<()> {
    let state = setup::open_session(config, &args.session)?;
    export_catalog(&state, &args.out)?;
    println!("{}", args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::tests::session_args;

    #[test]
    fn test_export_requires_unlock() {
        let dir = tempfile::tempdir().unwrap();
        let args = ExportArgs {
            session: SessionArgs::default(),
            out: dir.path().join("catalog.json"),
        };
        assert!(export(&AppConfig::default(), args).is_err());
    }

    #[test]
    fn test_export_with_unlock() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("catalog.json");
        let args = ExportArgs {
            session: session_args(Some("admin"), None),
            out: out.clone(),
        };

        export(&AppConfig::default(), args).unwrap();

        let contents = std::fs::read_to_string(out).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json["items"].as_array().unwrap().len(), 18);
        assert_eq!(json["pricing"]["exchangeRate"], 4.2);
    }
}
