//! `implant-offer evaluate`

use anyhow::Result;
use clap::Args;
use tracing::debug;

use offer_session::commands::{
    get_offer, update_exchange_rate, update_margin_tier, update_quantity, update_selling_price,
    update_surcharge,
};
use offer_session::{AppConfig, SessionState};

use crate::output::{self, OutputFormat};
use crate::setup::{self, parse_assignment, parse_band, SessionArgs};

#[derive(Args, Debug, Default)]
#[command(about = "Evaluate an offer against landed cost and the tiered minimum margin")]
pub struct EvaluateArgs {
    /// Item quantity as ID=N (repeatable)
    #[arg(long = "qty", value_name = "ID=N")]
    pub quantities: Vec<String>,

    /// Proposed selling price per distinguished unit
    #[arg(long, value_name = "PRICE", default_value = "0")]
    pub price: String,

    #[command(flatten)]
    pub session: SessionArgs,

    /// Exchange rate override (master mode)
    #[arg(long, value_name = "RATE")]
    pub exchange_rate: Option<String>,

    /// Import surcharge override in percent (master mode)
    #[arg(long, value_name = "PCT")]
    pub surcharge: Option<String>,

    /// Minimum margin override as BAND=PCT, BAND is base, mid or high
    /// (master mode, repeatable)
    #[arg(long = "tier", value_name = "BAND=PCT")]
    pub tiers: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub fn execute(config: &AppConfig, args: EvaluateArgs) -> Result<()> {
    let state = setup::open_session(config, &args.session)?;
    apply_inputs(&state, &args)?;

    let view = get_offer(&state);
    debug!(status = %view.status, total_offer = view.total_offer, "Offer evaluated");

    match args.format {
        OutputFormat::Json => println!("{}", output::to_json(&view)?),
        OutputFormat::Human => {
            let name = distinguished_name(&state);
            print!("{}", output::render_offer(&view, &config.display, &name)?);
        }
    }

    Ok(())
}

/// Feeds every input flag through the session commands.
fn apply_inputs(state: &SessionState, args: &EvaluateArgs) -> Result<()> {
    if let Some(rate) = &args.exchange_rate {
        update_exchange_rate(state, rate)?;
    }
    if let Some(pct) = &args.surcharge {
        update_surcharge(state, pct)?;
    }
    for raw in &args.tiers {
        let (band, pct) = parse_assignment(raw)?;
        update_margin_tier(state, parse_band(band)?, pct)?;
    }
    for raw in &args.quantities {
        let (id, quantity) = parse_assignment(raw)?;
        update_quantity(state, id, quantity)?;
    }
    update_selling_price(state, &args.price);
    Ok(())
}

fn distinguished_name(state: &SessionState) -> String {
    state.with_session(|s| {
        let id = &s.pricing().distinguished_item_id;
        s.catalog()
            .get(id)
            .map_or_else(|| id.clone(), |item| item.name.clone())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::tests::session_args;
    use offer_core::OfferStatus;

    fn args(quantities: &[&str], price: &str) -> EvaluateArgs {
        EvaluateArgs {
            quantities: quantities.iter().map(|q| q.to_string()).collect(),
            price: price.to_string(),
            ..EvaluateArgs::default()
        }
    }

    #[test]
    fn test_reference_offer() {
        let config = AppConfig::default();
        let args = args(&["implantBody=400"], "500");
        let state = setup::open_session(&config, &args.session).unwrap();
        apply_inputs(&state, &args).unwrap();

        let view = get_offer(&state);
        assert_eq!(view.status, OfferStatus::Accepted);
        assert_eq!(view.total_offer, 200_000.0);
        assert_eq!(distinguished_name(&state), "Implant Body");
    }

    #[test]
    fn test_overrides_need_master_mode() {
        let config = AppConfig::default();
        let mut locked = args(&["implantBody=400"], "500");
        locked.exchange_rate = Some("5".to_string());

        let state = setup::open_session(&config, &locked.session).unwrap();
        let err = apply_inputs(&state, &locked).unwrap_err();
        assert!(err.to_string().contains("Master mode is required"));
    }

    #[test]
    fn test_tier_override_when_unlocked() {
        let config = AppConfig::default();
        let mut unlocked = args(&["implantBody=400"], "300");
        unlocked.session = session_args(Some("admin"), None);
        unlocked.tiers = vec!["mid=20".to_string()];

        let state = setup::open_session(&config, &unlocked.session).unwrap();
        apply_inputs(&state, &unlocked).unwrap();

        // 94,248 × 1.2 = 113,097.6 ≤ 120,000
        let view = get_offer(&state);
        assert_eq!(view.status, OfferStatus::Accepted);
        assert_eq!(view.cost_summary.unwrap().required_min_margin_pct, 20.0);
    }

    #[test]
    fn test_unknown_item_fails() {
        let config = AppConfig::default();
        let args = args(&["abutment=3"], "500");
        let state = setup::open_session(&config, &args.session).unwrap();
        assert!(apply_inputs(&state, &args).is_err());
    }
}
